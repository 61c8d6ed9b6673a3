mod tests {
    use std::sync::Arc;
    use std::thread::{self, sleep};
    use std::time::{Duration as StdDuration, Instant as StdInstant};

    use myrtio_zone_light::color::lerp_colors;
    use myrtio_zone_light::sink::Recorder;
    use myrtio_zone_light::{
        ColorTransition, Duration, LightError, LightMode, ModeCoordinator, PersistedMode, Rgb,
        STEPS, Timings,
    };

    const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
    const BLUE: Rgb = Rgb { r: 0, g: 0, b: 255 };
    const STATIC_DURATION: Duration = Duration::from_millis(100);
    const RAINBOW_TICK: Duration = Duration::from_millis(10);

    /// Poll until the sink has seen a frame, giving up after a second
    fn wait_for_frame(recorder: &Recorder) {
        let deadline = StdInstant::now() + StdDuration::from_secs(1);
        while recorder.is_empty() && StdInstant::now() < deadline {
            sleep(StdDuration::from_millis(1));
        }
    }

    fn coordinator() -> (ModeCoordinator<Recorder>, Recorder) {
        let recorder = Recorder::new();
        (ModeCoordinator::new(recorder.clone()), recorder)
    }

    #[test]
    fn test_first_static_request_is_one_write() {
        let (coordinator, recorder) = coordinator();
        coordinator
            .request_static_hex("ff0000", STATIC_DURATION)
            .unwrap();

        assert_eq!(recorder.writes(), vec![RED]);
        assert_eq!(coordinator.mode(), LightMode::Static(RED));
        assert_eq!(coordinator.last_color(), Some(RED));
    }

    #[test]
    fn test_static_request_crossfades_from_last_color() {
        let (coordinator, recorder) = coordinator();
        coordinator
            .request_static_hex("ff0000", STATIC_DURATION)
            .unwrap();
        recorder.clear();

        coordinator
            .request_static_hex("0000ff", STATIC_DURATION)
            .unwrap();
        let writes = recorder.writes();
        assert_eq!(writes.len(), STEPS as usize);
        assert_eq!(writes[0], Rgb::new(242, 0, 13));
        assert_eq!(*writes.last().unwrap(), BLUE);
    }

    #[test]
    fn test_repeated_color_is_one_write() {
        let (coordinator, recorder) = coordinator();
        coordinator
            .request_static_hex("ff0000", STATIC_DURATION)
            .unwrap();
        coordinator
            .request_static_hex("FF0000", STATIC_DURATION)
            .unwrap();
        assert_eq!(recorder.writes(), vec![RED, RED]);
    }

    #[test]
    fn test_seeded_coordinator_crossfades_immediately() {
        let recorder = Recorder::new();
        let coordinator = ModeCoordinator::with_last_color(recorder.clone(), Some(RED));
        coordinator
            .request_static(BLUE, Duration::from_millis(20))
            .unwrap();
        assert_eq!(recorder.len(), STEPS as usize);
    }

    #[test]
    fn test_invalid_hex_is_rejected_before_any_write() {
        let (coordinator, recorder) = coordinator();
        let result = coordinator.request_static_hex("12345", STATIC_DURATION);
        assert!(matches!(result, Err(LightError::InvalidColorFormat(_))));
        assert!(recorder.is_empty());
        assert_eq!(coordinator.last_color(), None);
    }

    #[test]
    fn test_invalid_hex_leaves_rainbow_running() {
        let (coordinator, _recorder) = coordinator();
        coordinator.request_rainbow(RAINBOW_TICK).unwrap();

        assert!(coordinator.request_static_hex("nothex", STATIC_DURATION).is_err());
        assert!(coordinator.is_rainbow_running());
        assert_eq!(coordinator.mode(), LightMode::Rainbow { tick: RAINBOW_TICK });
        coordinator.request_stop();
    }

    #[test]
    fn test_rainbow_then_stop() {
        let (coordinator, recorder) = coordinator();
        coordinator.request_rainbow(RAINBOW_TICK).unwrap();
        assert_eq!(coordinator.mode(), LightMode::Rainbow { tick: RAINBOW_TICK });
        wait_for_frame(&recorder);
        coordinator.request_stop();

        assert!(!coordinator.is_rainbow_running());
        assert_eq!(coordinator.mode(), LightMode::Off);
        let written = recorder.len();
        assert!(written >= 1);
        sleep(StdDuration::from_millis(50));
        assert_eq!(recorder.len(), written);
    }

    #[test]
    fn test_static_request_stops_rainbow() {
        let (coordinator, recorder) = coordinator();
        coordinator
            .request_rainbow(Duration::from_millis(1))
            .unwrap();
        sleep(StdDuration::from_millis(10));

        coordinator
            .request_static(BLUE, Duration::from_millis(20))
            .unwrap();
        assert!(!coordinator.is_rainbow_running());
        assert_eq!(coordinator.mode(), LightMode::Static(BLUE));

        let written = recorder.len();
        sleep(StdDuration::from_millis(30));
        assert_eq!(recorder.len(), written);
        assert_eq!(recorder.last(), Some(BLUE));
    }

    #[test]
    fn test_static_after_rainbow_starts_from_last_frame() {
        let (coordinator, recorder) = coordinator();
        coordinator
            .request_static(RED, Duration::from_millis(0))
            .unwrap();
        coordinator
            .request_rainbow(Duration::from_millis(1))
            .unwrap();
        sleep(StdDuration::from_millis(15));
        coordinator.request_stop();

        let last_frame = coordinator.last_color().unwrap();
        assert_eq!(Some(last_frame), recorder.last());
        recorder.clear();

        let target = Rgb::new(10, 20, 30);
        coordinator
            .request_static(target, Duration::from_millis(20))
            .unwrap();
        let writes = recorder.writes();
        assert_eq!(writes[0], lerp_colors(last_frame, target, 1, STEPS));
        assert_eq!(writes.len(), STEPS as usize);
    }

    #[test]
    fn test_transition_is_never_interleaved_with_rainbow() {
        let recorder = Recorder::new();
        let coordinator = Arc::new(ModeCoordinator::new(recorder.clone()));
        coordinator
            .request_rainbow(Duration::from_millis(1))
            .unwrap();
        sleep(StdDuration::from_millis(10));

        let target = Rgb::new(0x12, 0x34, 0x56);
        let worker = {
            let coordinator = Arc::clone(&coordinator);
            thread::spawn(move || coordinator.request_static(target, Duration::from_millis(60)))
        };
        // Competing rainbow request: either runs before the transition or waits for it
        sleep(StdDuration::from_millis(5));
        coordinator
            .request_rainbow(Duration::from_millis(1))
            .unwrap();
        worker.join().unwrap().unwrap();
        coordinator.request_stop();

        let writes = recorder.writes();
        let steps = STEPS as usize;
        let position = writes
            .windows(steps + 1)
            .position(|window| {
                let expected: Vec<Rgb> = ColorTransition::new(window[0], target).steps().collect();
                window[1..] == expected[..]
            })
            .expect("transition steps should appear contiguously");

        // Anything after the transition comes from a fresh session at hue 0
        if let Some(next) = writes.get(position + steps + 1) {
            assert_eq!(*next, RED);
        }
    }

    #[test]
    fn test_rainbow_request_replaces_session() {
        let (coordinator, _recorder) = coordinator();
        coordinator.request_rainbow(RAINBOW_TICK).unwrap();
        coordinator
            .request_rainbow(Duration::from_millis(20))
            .unwrap();
        assert!(coordinator.is_rainbow_running());
        assert_eq!(
            coordinator.mode(),
            LightMode::Rainbow {
                tick: Duration::from_millis(20)
            }
        );
        coordinator.request_stop();
    }

    #[test]
    fn test_apply_persisted_modes() {
        let (coordinator, recorder) = coordinator();
        let timings = Timings::default();

        coordinator
            .apply(&PersistedMode::static_color(BLUE), &timings)
            .unwrap();
        assert_eq!(recorder.writes(), vec![BLUE]);

        coordinator
            .apply(&PersistedMode::rainbow(5), &timings)
            .unwrap();
        assert_eq!(
            coordinator.mode(),
            LightMode::Rainbow {
                tick: Duration::from_millis(5)
            }
        );

        let no_color = PersistedMode {
            color: None,
            ..PersistedMode::static_color(RED)
        };
        coordinator.apply(&no_color, &timings).unwrap();
        assert!(!coordinator.is_rainbow_running());
        assert_eq!(coordinator.mode(), LightMode::Off);
    }
}
