/*
 Nixie clock firmware.

 Target: ATmega328P (Arduino Uno pinout), clock at 16 MHz.

 Four Nixie tubes share one BCD decoder and are multiplexed by the main loop.
 Timer 1 keeps the time, timer 2 counts milliseconds for the buttons and
 timer 0 drives the backlight PWM.

 This program is free software: you can redistribute it and/or modify
 it under the terms of the GNU General Public License as published by
 the Free Software Foundation, either version 3 of the License, or
 (at your option) any later version.

 This program is distributed in the hope that it will be useful,
 but WITHOUT ANY WARRANTY; without even the implied warranty of
 MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 GNU General Public License for more details.

 You should have received a copy of the GNU General Public License
 along with this program.  If not, see <http://www.gnu.org/licenses/>.

 */

#![cfg_attr(target_arch = "avr", no_std)]
#![cfg_attr(target_arch = "avr", no_main)]
#![cfg_attr(target_arch = "avr", feature(abi_avr_interrupt))]

// The firmware only exists for the AVR target; elsewhere only the library is
// interesting (and tested).
#[cfg(not(target_arch = "avr"))]
fn main() {}

#[cfg(all(target_arch = "avr", feature = "panic-serial"))]
mod panic;
#[cfg(target_arch = "avr")]
mod timer;

#[cfg(all(target_arch = "avr", not(feature = "panic-serial")))]
use panic_halt as _;

#[cfg(target_arch = "avr")]
use arduino_hal::prelude::*;
#[cfg(target_arch = "avr")]
use arduino_hal::simple_pwm::{IntoPwmPin, Prescaler, Timer0Pwm};
#[cfg(target_arch = "avr")]
use nixieclock::{
    config::BAUD_RATE, Backlight, Board, Clock, Config, DigitBus, Inputs, Multiplexer, SharedState,
};

/// Shared with the 1 Hz timer interrupt.
#[cfg(target_arch = "avr")]
static STATE: SharedState = SharedState::new(&Config::DEFAULT);

#[cfg(target_arch = "avr")]
#[arduino_hal::entry]
fn main() -> ! {
    let config = Config::DEFAULT;
    let timing = config.timing;

    let dp = arduino_hal::Peripherals::take().unwrap();
    let pins = arduino_hal::pins!(dp);
    let mut serial = arduino_hal::default_serial!(dp, pins, BAUD_RATE);

    // Converted from the original board by correlating its PORTx and DDRx bit
    // manipulation against the Uno pin mapping.
    let bus = DigitBus::new(
        [
            pins.d8.into_output().downgrade(),  // PB0, BCD A
            pins.d9.into_output().downgrade(),  // PB1, BCD B
            pins.d10.into_output().downgrade(), // PB2, BCD C
            pins.d11.into_output().downgrade(), // PB3, BCD D
        ],
        [
            pins.d2.into_output().downgrade(), // PD2, tube 1
            pins.d3.into_output().downgrade(), // PD3, tube 2
            pins.d4.into_output().downgrade(), // PD4, tube 3
            pins.d5.into_output().downgrade(), // PD5, tube 4
        ],
    );
    let separator = pins.a3.into_output().downgrade(); // PC3
    let feedback = pins.d12.into_output().downgrade(); // PB4

    let timer0 = Timer0Pwm::new(dp.TC0, Prescaler::Direct);
    let mut backlight_pwm = pins.d6.into_output().into_pwm(&timer0); // PD6, OC0A
    backlight_pwm.enable();

    // Buttons pull the line to ground.
    let inputs = Inputs::new(
        pins.d7.into_pull_up_input().downgrade(), // PD7, brightness
        pins.a0.into_pull_up_input().downgrade(), // PC0, hour
        pins.a1.into_pull_up_input().downgrade(), // PC1, minute
        &timing,
    );

    let board = Board {
        display: Multiplexer::new(bus, separator, timing.digit_dwell_us),
        backlight: Backlight::new(backlight_pwm, feedback, timing.feedback_pulse_ms),
        inputs,
        delay: arduino_hal::Delay::new(),
    };
    let mut clock = Clock::new(&STATE, board, &config);

    timer::init_tc1(dp.TC1);
    timer::init_tc2(dp.TC2);
    // SAFETY: all shared state is set up, the ISRs only touch `STATE` and the millisecond counter.
    unsafe { avr_device::interrupt::enable() };

    ufmt::uwriteln!(&mut serial, "nixieclock {}\r", STATE.time()).unwrap_infallible();

    if let Err(e) = clock.start() {
        ufmt::uwriteln!(&mut serial, "backlight: {}\r", e).unwrap_infallible();
    }

    loop {
        let result = clock.pass(timer::millis(), |event| {
            ufmt::uwriteln!(&mut serial, "{}\r", event).unwrap_infallible();
        });
        if let Err(e) = result {
            ufmt::uwriteln!(&mut serial, "pass failed: {}\r", e).unwrap_infallible();
        }
    }
}
