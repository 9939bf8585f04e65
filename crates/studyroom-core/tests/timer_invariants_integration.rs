//! Property tests: timer invariants hold across arbitrary command sequences.

use proptest::prelude::*;
use studyroom_core::{CountdownTimer, TimerState};

#[derive(Debug, Clone, Copy)]
enum Op {
    Start,
    Pause,
    Stop,
    Complete,
    Reset,
    Tick,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        1 => Just(Op::Start),
        1 => Just(Op::Pause),
        1 => Just(Op::Stop),
        1 => Just(Op::Complete),
        1 => Just(Op::Reset),
        // Ticks dominate real sessions.
        4 => Just(Op::Tick),
    ]
}

fn apply(timer: &mut CountdownTimer, op: Op) {
    match op {
        Op::Start => timer.start(),
        Op::Pause => timer.pause(),
        Op::Stop => timer.stop(),
        Op::Complete => timer.complete(),
        Op::Reset => timer.reset(),
        Op::Tick => timer.tick(),
    };
}

proptest! {
    #[test]
    fn invariants_hold_for_every_reachable_state(
        total in 1u64..50,
        ops in proptest::collection::vec(op(), 0..200),
    ) {
        let mut timer = CountdownTimer::new(total).unwrap();
        for op in ops {
            apply(&mut timer, op);
            prop_assert!(timer.remaining_secs() <= timer.total_secs());
            prop_assert!(!(timer.is_running() && timer.is_completed()));
            let pct = timer.progress_pct();
            prop_assert!((0.0..=100.0).contains(&pct));
            if timer.is_running() {
                prop_assert!(timer.remaining_secs() > 0);
            }
        }
    }

    #[test]
    fn fresh_session_is_idle(total in 1u64..1_000_000) {
        let timer = CountdownTimer::new(total).unwrap();
        prop_assert_eq!(timer.remaining_secs(), total);
        prop_assert_eq!(timer.state(), TimerState::Idle);
        prop_assert_eq!(timer.progress_pct(), 0.0);
    }

    #[test]
    fn running_to_the_end_takes_exactly_total_ticks(total in 1u64..500) {
        let mut timer = CountdownTimer::new(total).unwrap();
        timer.start();
        let mut ticks = 0;
        while timer.is_running() {
            timer.tick();
            ticks += 1;
        }
        prop_assert_eq!(ticks, total);
        prop_assert!(timer.is_completed());
        prop_assert_eq!(timer.remaining_secs(), 0);
    }

    #[test]
    fn reset_always_restores_initial_state(
        total in 1u64..50,
        ops in proptest::collection::vec(op(), 0..100),
    ) {
        let mut timer = CountdownTimer::new(total).unwrap();
        for op in ops {
            apply(&mut timer, op);
        }
        timer.reset();
        prop_assert_eq!(timer, CountdownTimer::new(total).unwrap());
    }

    #[test]
    fn pause_twice_equals_pause_once(
        total in 2u64..50,
        ticks in 0usize..10,
    ) {
        let mut timer = CountdownTimer::new(total).unwrap();
        timer.start();
        for _ in 0..ticks {
            timer.tick();
        }
        timer.pause();
        let once = timer.clone();
        timer.pause();
        prop_assert_eq!(timer, once);
    }
}
