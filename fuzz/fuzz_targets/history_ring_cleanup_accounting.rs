#![no_main]

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use libfuzzer_sys::fuzz_target;
use retreat::ds::HistoryRing;

// Fuzz cleanup hook accounting on HistoryRing
//
// Every pushed value carries a unique id. After a final clear the hook must
// have seen each id exactly once, and never an id that is still reachable
// through undo/redo.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let capacity = ((data[0] % 32) as usize).max(1);
    let released = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&released);
    let mut history = HistoryRing::with_cleanup(capacity, move |id: u64| {
        sink.borrow_mut().push(id)
    });

    let mut next_id = 0u64;
    for &byte in &data[1..] {
        match byte % 4 {
            0 | 1 => {
                history.push(next_id);
                next_id += 1;
            }
            2 => {
                history.undo();
            }
            3 => {
                history.redo();
            }
            _ => unreachable!(),
        }

        let live: HashSet<u64> = history.iter().copied().collect();
        assert!(released.borrow().iter().all(|id| !live.contains(id)));
    }

    history.clear();

    let mut seen = released.borrow().clone();
    seen.sort_unstable();
    assert!(seen.iter().copied().eq(0..next_id));
});
