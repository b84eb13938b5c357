//! # Post-Construction State Tests
//!
//! Immediately after construction, for any valid configuration: both map
//! tables are the identity, the free list holds exactly the surplus
//! physical registers, nothing is in flight, the branch mask is zero, and
//! readiness covers exactly the identity-mapped registers.

use rstest::rstest;

use renamesim_core::common::{LogReg, PhysReg};
use renamesim_core::{Renamer, RenamerConfig};

#[rstest]
#[case::tiny(4, 6, 2, 4)]
#[case::scenario(8, 12, 4, 8)]
#[case::wide(32, 96, 16, 64)]
#[case::full_mask(16, 48, 64, 32)]
fn test_initial_state(
    #[case] logical: usize,
    #[case] physical: usize,
    #[case] branches: usize,
    #[case] active: usize,
) {
    let config = RenamerConfig {
        logical_regs: logical,
        physical_regs: physical,
        branch_checkpoints: branches,
        active_list_size: active,
    };
    let renamer = Renamer::new(&config).unwrap();

    // RMT == AMT == identity.
    for r in 0..logical {
        assert_eq!(renamer.rename_source(LogReg(r)), PhysReg(r));
        assert_eq!(renamer.committed_mapping(LogReg(r)), PhysReg(r));
    }

    // Free list holds exactly the surplus registers.
    assert_eq!(renamer.free_regs(), physical - logical);
    assert!(!renamer.stall_free_list(physical - logical));
    assert!(renamer.stall_free_list(physical - logical + 1));

    // Nothing in flight, no outstanding branches.
    assert_eq!(renamer.in_flight(), 0);
    assert!(renamer.peek_head().is_none());
    assert!(renamer.branch_mask().is_empty());
    assert!(!renamer.stall_branch(branches));
    assert!(renamer.stall_branch(branches + 1));

    // Identity-backed registers ready, all others not.
    for p in 0..physical {
        assert_eq!(renamer.is_ready(PhysReg(p)), p < logical);
    }
}

#[test]
fn test_allocation_order_is_deterministic() {
    // Two identical machines hand out the same registers for the same
    // rename sequence.
    let config = RenamerConfig {
        logical_regs: 8,
        physical_regs: 16,
        branch_checkpoints: 4,
        active_list_size: 8,
    };
    let mut a = Renamer::new(&config).unwrap();
    let mut b = Renamer::new(&config).unwrap();
    for r in [3, 1, 3, 7] {
        assert_eq!(a.rename_destination(LogReg(r)), b.rename_destination(LogReg(r)));
    }
}
