mod common;

mod tests {
    use core::convert::Infallible;

    use embedded_hal::pwm::{self, ErrorKind, ErrorType, SetDutyCycle};
    use myrtio_led_shaper::{OutputSink, PatternBank, PwmOutputs, Waveform};

    use crate::common::SequenceRng;

    #[derive(Default)]
    struct MockPwm {
        duty: u16,
    }

    impl ErrorType for MockPwm {
        type Error = Infallible;
    }

    impl SetDutyCycle for MockPwm {
        fn max_duty_cycle(&self) -> u16 {
            1000
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
            self.duty = duty;
            Ok(())
        }
    }

    #[derive(Debug)]
    struct Broken;

    impl pwm::Error for Broken {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    struct BrokenPwm;

    impl ErrorType for BrokenPwm {
        type Error = Broken;
    }

    impl SetDutyCycle for BrokenPwm {
        fn max_duty_cycle(&self) -> u16 {
            1000
        }

        fn set_duty_cycle(&mut self, _duty: u16) -> Result<(), Self::Error> {
            Err(Broken)
        }
    }

    #[test]
    fn test_levels_map_to_duty_cycle() {
        let mut outputs = PwmOutputs::new([MockPwm::default(), MockPwm::default(), MockPwm::default()]);
        outputs.set_brightness(0, 255);
        outputs.set_brightness(1, 51);
        outputs.set_brightness(2, 0);
        // Unknown channels are ignored
        outputs.set_brightness(7, 255);

        let duties: Vec<_> = outputs.channels().iter().map(|pwm| pwm.duty).collect();
        assert_eq!(duties, vec![1000, 200, 0]);
    }

    #[test]
    fn test_rejected_writes_are_ignored() {
        let mut outputs = PwmOutputs::new([BrokenPwm]);
        outputs.set_brightness(0, 128);
    }

    #[test]
    fn test_bank_drives_pwm_channels() {
        let mut bank = PatternBank::<_, 2>::new(2, SequenceRng::zeros());
        bank.set_pattern(0, Waveform::On, 0);
        bank.set_scale(0, 1023);
        let mut outputs = PwmOutputs::new([MockPwm::default(), MockPwm::default()]);

        bank.tick_into(&mut outputs);
        let [on, off] = outputs.into_channels();
        assert_eq!(on.duty, 996);
        assert_eq!(off.duty, 3);
    }
}
