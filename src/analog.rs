/// One-shot analog sampling, shaped like the AVR ADC: start a conversion on `input`, poll until done.
///
/// `I` is whatever the platform uses to name an input pin (on the Mega, a type-erased
/// `arduino_hal::adc::Channel`). Results lie in `0..2^resolution`; range is not checked.
pub trait AnalogSource<I> {
    type Error;

    fn read(&mut self, input: &I) -> nb::Result<u16, Self::Error>;

    fn read_blocking(&mut self, input: &I) -> Result<u16, Self::Error> {
        nb::block!(self.read(input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Needs `polls` WouldBlocks before it converts
    struct SlowAdc {
        polls: u8,
    }

    impl AnalogSource<u16> for SlowAdc {
        type Error = ();

        fn read(&mut self, input: &u16) -> nb::Result<u16, ()> {
            if self.polls > 0 {
                self.polls -= 1;
                return Err(nb::Error::WouldBlock);
            }
            Ok(*input)
        }
    }

    #[test]
    fn rb_spins_until_ready() {
        let mut adc = SlowAdc { polls: 3 };
        assert_eq!(adc.read_blocking(&512), Ok(512));
        assert_eq!(adc.polls, 0);
    }

    #[test]
    fn rb_passes_errors() {
        struct DeadAdc;
        impl AnalogSource<u8> for DeadAdc {
            type Error = &'static str;
            fn read(&mut self, _: &u8) -> nb::Result<u16, Self::Error> {
                Err(nb::Error::Other("disconnected"))
            }
        }

        assert_eq!(DeadAdc.read_blocking(&0), Err("disconnected"));
    }
}
