#![no_std]
#![no_main]

use core::convert::Infallible;

use arduino_hal::adc::Channel;
use arduino_hal::prelude::*;
use muxscan::{AnalogSource, Scanner, SERIAL_BAUD};
use panic_halt as _;

// arduino_hal::Adc is foreign, so it gets a local face for the sampling trait.
// Conversions are ~100us at the default prescaler; not worth polling.
struct BoardAdc(arduino_hal::Adc);

impl AnalogSource<Channel> for BoardAdc {
    type Error = Infallible;

    fn read(&mut self, input: &Channel) -> nb::Result<u16, Infallible> {
        Ok(self.0.read_blocking(input))
    }
}

#[arduino_hal::entry]
fn main() -> ! {
    let dp = arduino_hal::Peripherals::take().unwrap();
    let pins = arduino_hal::pins!(dp);

    // serial interface
    let mut serial = arduino_hal::default_serial!(dp, pins, SERIAL_BAUD);

    let mut adc = arduino_hal::Adc::new(dp.ADC, Default::default());

    // S0-S3 on both muxes (d2 = LSB)
    let select = [
        pins.d2.into_output().downgrade(),
        pins.d3.into_output().downgrade(),
        pins.d4.into_output().downgrade(),
        pins.d5.into_output().downgrade(),
    ];

    // A0 is the shared reference; A1-A8 belong to slots 0-7
    let reference = pins.a0.into_analog_input(&mut adc).into_channel();
    let inputs = [
        pins.a1.into_analog_input(&mut adc).into_channel(),
        pins.a2.into_analog_input(&mut adc).into_channel(),
        pins.a3.into_analog_input(&mut adc).into_channel(),
        pins.a4.into_analog_input(&mut adc).into_channel(),
        pins.a5.into_analog_input(&mut adc).into_channel(),
        pins.a6.into_analog_input(&mut adc).into_channel(),
        pins.a7.into_analog_input(&mut adc).into_channel(),
        pins.a8.into_analog_input(&mut adc).into_channel(),
    ];

    ufmt::uwriteln!(&mut serial, "OK: mux scanner up @ {} baud\r", SERIAL_BAUD).unwrap_infallible();

    let mut scanner = Scanner::new(select, arduino_hal::Delay::new(), BoardAdc(adc), reference, inputs);
    scanner.run(&mut serial)
}
