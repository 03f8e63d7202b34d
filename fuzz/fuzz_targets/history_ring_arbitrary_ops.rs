#![no_main]

use std::collections::VecDeque;

use libfuzzer_sys::fuzz_target;
use retreat::ds::HistoryRing;

// Fuzz arbitrary operation sequences on HistoryRing
//
// Drives push, undo, redo, get, and clear against a deque model of the
// retained branch and checks every observable after each step.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    // First byte picks the capacity (1-32)
    let capacity = ((data[0] % 32) as usize).max(1);
    let mut history = HistoryRing::new(capacity);

    // Retained values oldest first, plus the position of the current one
    let mut model: VecDeque<u8> = VecDeque::new();
    let mut cursor = 0usize;

    let mut idx = 1;
    while idx + 1 < data.len() {
        let op = data[idx] % 5;
        let value = data[idx + 1];

        match op {
            0 => {
                history.push(value);
                if !model.is_empty() {
                    model.truncate(cursor + 1);
                }
                model.push_back(value);
                if model.len() > capacity {
                    model.pop_front();
                }
                cursor = model.len() - 1;
            }
            1 => {
                let expected = !model.is_empty() && cursor > 0;
                assert_eq!(history.undo(), expected);
                if expected {
                    cursor -= 1;
                }
            }
            2 => {
                let expected = !model.is_empty() && cursor + 1 < model.len();
                assert_eq!(history.redo(), expected);
                if expected {
                    cursor += 1;
                }
            }
            3 => {
                assert_eq!(history.get(), model.get(cursor));
            }
            4 => {
                history.clear();
                model.clear();
                cursor = 0;
                assert!(history.is_empty());
                assert_eq!(history.get(), None);
            }
            _ => unreachable!(),
        }

        history.debug_validate_invariants();
        assert!(history.len() <= capacity);
        assert_eq!(history.capacity(), capacity);
        assert_eq!(history.len(), model.len());
        assert_eq!(history.get(), model.get(cursor));
        assert_eq!(history.can_undo(), !model.is_empty() && cursor > 0);
        assert_eq!(
            history.can_redo(),
            !model.is_empty() && cursor + 1 < model.len()
        );
        assert!(history.iter().copied().eq(model.iter().copied()));

        idx += 2;
    }
});
