//! # Commit-Path Tests
//!
//! Retirement round trips: the architectural map adopts the retired
//! mapping and the *previous* mapping — never the new one — returns to the
//! free list tail.

use pretty_assertions::assert_eq;

use renamesim_core::common::{LogReg, PhysReg};

use crate::common::{nop, rename_and_dispatch, small_renamer, writer};

#[test]
fn test_rename_commit_roundtrip() {
    // 8 logical, 12 physical registers, no branches: renaming r3 yields p8,
    // the first free ID beyond the logical range; committing frees p3, the
    // prior AMT mapping.
    let mut renamer = small_renamer();

    let phys = renamer.rename_destination(LogReg(3));
    assert_eq!(phys, PhysReg(8));

    let slot = renamer.dispatch(writer(0x1000, LogReg(3), phys));
    renamer.set_complete(slot);

    let head = renamer.peek_head().unwrap();
    assert!(head.completed && !head.exception);

    let _ = renamer.retire_head();
    assert_eq!(renamer.committed_mapping(LogReg(3)), PhysReg(8));
    // The freed register is exactly the prior mapping: renaming three more
    // destinations drains p9..p11, and the fourth allocation hands back p3.
    let _ = renamer.rename_destination(LogReg(0));
    let _ = renamer.rename_destination(LogReg(1));
    let _ = renamer.rename_destination(LogReg(2));
    assert_eq!(renamer.rename_destination(LogReg(4)), PhysReg(3));
}

#[test]
fn test_retire_without_destination_frees_nothing() {
    let mut renamer = small_renamer();
    let slot = renamer.dispatch(nop(0x2000));
    renamer.set_complete(slot);

    let free_before = renamer.free_regs();
    let _ = renamer.retire_head();
    assert_eq!(renamer.free_regs(), free_before);
    assert_eq!(renamer.in_flight(), 0);
}

#[test]
fn test_active_list_fill_and_drain() {
    // Dispatch up to capacity, observe the stall signal, retire one, and
    // observe it clear.
    let mut renamer = small_renamer();
    let mut slots = Vec::new();
    for i in 0..8 {
        assert!(!renamer.stall_dispatch(1));
        slots.push(renamer.dispatch(nop(i * 4)));
    }
    assert!(renamer.stall_dispatch(1));

    renamer.set_complete(slots[0]);
    let _ = renamer.retire_head();
    assert!(!renamer.stall_dispatch(1));
}

#[test]
fn test_commits_are_in_program_order() {
    let mut renamer = small_renamer();
    let (first_phys, first_slot) = rename_and_dispatch(&mut renamer, 0x100, LogReg(1));
    let (second_phys, second_slot) = rename_and_dispatch(&mut renamer, 0x104, LogReg(1));

    // Both write r1; the younger completes first, but the head view stays on
    // the older instruction until it completes.
    renamer.set_complete(second_slot);
    assert_eq!(renamer.peek_head().unwrap().pc, 0x100);
    assert!(!renamer.peek_head().unwrap().completed);

    renamer.set_complete(first_slot);
    let _ = renamer.retire_head();
    assert_eq!(renamer.committed_mapping(LogReg(1)), first_phys);
    let _ = renamer.retire_head();
    assert_eq!(renamer.committed_mapping(LogReg(1)), second_phys);
}

#[test]
fn test_fault_flags_are_data_not_control_flow() {
    // Faults are recorded for commit arbitration to read; the unit itself
    // takes no action until told to flush or resolve.
    let mut renamer = small_renamer();
    let slot = renamer.dispatch(nop(0x3000));
    renamer.set_complete(slot);
    renamer.set_exception(slot);
    renamer.set_load_violation(slot);
    renamer.set_value_misprediction(slot);

    assert!(renamer.is_exception(slot));
    let head = renamer.peek_head().unwrap();
    assert!(head.exception && head.load_violation && head.value_mispredict);
    assert!(!head.branch_mispredict);
    assert_eq!(renamer.in_flight(), 1);
}
