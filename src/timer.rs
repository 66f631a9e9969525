//! Hardware timers: the 1 Hz clock tick and a `millis()` counter for the buttons.
//!
//! TC0 is left alone for the backlight PWM.
//!
//! Based on https://blog.rahix.de/005-avr-hal-millis/
//!
//! License assumed to be MIT based on https://github.com/Rahix/avr-hal/blob/main/examples/arduino-uno/src/bin/uno-millis.rsm
use avr_device::interrupt::Mutex;
use core::cell;

use crate::STATE;

// 16 MHz / 1024 = 15625 counts per second.  CTC clears on the count after the
// compare value, hence the - 1.
const TICK_PRESCALER: u32 = 1024;
const TICK_COMPARE: u16 = (16_000_000 / TICK_PRESCALER - 1) as u16;

// Possible Values:
//
// ╔═══════════╦══════════════╦═══════════════════╗
// ║ PRESCALER ║ TIMER_COUNTS ║ Overflow Interval ║
// ╠═══════════╬══════════════╬═══════════════════╣
// ║        64 ║          250 ║              1 ms ║
// ║       256 ║          125 ║              2 ms ║
// ║       256 ║          250 ║              4 ms ║
// ║      1024 ║          125 ║              8 ms ║
// ║      1024 ║          250 ║             16 ms ║
// ╚═══════════╩══════════════╩═══════════════════╝
const PRESCALER: u32 = 64;
const TIMER_COUNTS: u32 = 250;

const MILLIS_INCREMENT: u16 = (PRESCALER * TIMER_COUNTS / 16000) as _;

static MILLIS_COUNTER: Mutex<cell::Cell<u16>> = Mutex::new(cell::Cell::new(0));

/// Timer/Counter 1 Compare Match A: once a second.
#[avr_device::interrupt(atmega328p)]
#[allow(non_snake_case)]
fn TIMER1_COMPA() {
    STATE.tick();
}

/// Timer/Counter 2 Compare Match A interrupt service routine.
#[avr_device::interrupt(atmega328p)]
#[allow(non_snake_case)]
fn TIMER2_COMPA() {
    avr_device::interrupt::free(|cs| {
        let counter_cell = MILLIS_COUNTER.borrow(cs);
        let counter = counter_cell.get();
        counter_cell.set(counter.wrapping_add(MILLIS_INCREMENT));
    })
}

/// Return the number of milliseconds counted since `init_tc2()` has been called.
/// Wraps about every 65 seconds.
pub fn millis() -> u16 {
    avr_device::interrupt::free(|cs| MILLIS_COUNTER.borrow(cs).get())
}

/// Initialise Timer/Counter 1 to interrupt at exactly 1 Hz (CTC mode, top = OCR1A).
pub fn init_tc1(tc1: arduino_hal::pac::TC1) {
    tc1.tccr1a.write(|w| w.wgm1().bits(0b00));
    tc1.ocr1a.write(|w| w.bits(TICK_COMPARE));
    tc1.tccr1b.write(|w| w.wgm1().bits(0b01).cs1().prescale_1024());
    tc1.timsk1.write(|w| w.ocie1a().set_bit());
}

/// Initialise Timer/Counter 2 for counting milliseconds.
/// Configures the TC2 timer for the interval defined by consts PRESCALER and TIMER_COUNTS (in CTC mode).
// https://blog.rahix.de/005-avr-hal-millis/
pub fn init_tc2(tc2: arduino_hal::pac::TC2) {
    // Set overflow behaviour of the timer in TCCR2A to Clear Timer on Compare mode.
    // Use TIMER2_COMPA interrupt as a result.
    tc2.tccr2a.write(|w| w.wgm2().ctc());

    // Set the overflow maximum for CTC mode in OCR2A.
    tc2.ocr2a.write(|w| w.bits((TIMER_COUNTS - 1) as u8));

    // Configure prescaling in TCCR2B.  TC2 has its own set of prescalers.
    tc2.tccr2b.write(|w| match PRESCALER {
        8 => w.cs2().prescale_8(),
        64 => w.cs2().prescale_64(),
        256 => w.cs2().prescale_256(),
        1024 => w.cs2().prescale_1024(),
        _ => panic!(),
    });

    // Enable compare interrupt in TIMSK2.  From this point on when the timer matches and interrupts are enabled, the ISR will run.
    tc2.timsk2.write(|w| w.ocie2a().set_bit());

    // Reset the counter.
    avr_device::interrupt::free(|cs| {
        MILLIS_COUNTER.borrow(cs).set(0);
    });
}
