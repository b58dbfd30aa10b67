//! Hardware definitions capturing the configuration of the board
use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::digital::v2::{InputPin, OutputPin};
use tm4c123x_hal::gpio::{
    gpioa::*, gpiob::*, gpiof::*, AlternateFunction, GpioExt, Input, Output, PullUp, PushPull,
    AF1, AF3, AF4,
};
use tm4c123x_hal::i2c::I2c;
use tm4c123x_hal::serial::{self, Serial};
use tm4c123x_hal::sysctl::{
    Clocks, CrystalFrequency, Divider, Oscillator, PowerControl, SysctlExt, SystemClock,
};
use tm4c123x_hal::time::{Bps, Hertz, U32Ext};
use tm4c123x_hal::tm4c123x::UART0;

use crate::config::{BAUD_RATE, SYSTEM_CLOCK_HZ};
use crate::drivers::adc::{Adc, OverSampleMultiplier};
use crate::drivers::oled::Oled;
use crate::drivers::pwm::Buzzer;
use crate::drivers::timer::{ServiceTimer, SysTickTimer};
use crate::hal::{Button, ButtonPad, PinBank};

/// Console UART on the debug USB bridge
pub type Uart = Serial<
    UART0,
    PA1<AlternateFunction<AF1, PushPull>>,
    PA0<AlternateFunction<AF1, PushPull>>,
    (),
    (),
>;

/// Hardware definitions for the TM4C123G LaunchPad with the lab add-ons
pub struct Board {
    /// Paces the lab's main tick
    pub systick: SysTickTimer,
    /// Power gating for peripherals in the TM4C123x
    pub power_control: PowerControl,

    /// Serial console, 115200 8N1
    pub uart: Uart,
    /// Heartbeat LED (blue, PF2)
    pub led: PF2<Output<PushPull>>,
    /// SW1 and SW2
    pub buttons: LaunchpadButtons,
    /// Stepper driver inputs
    pub coils: CoilPins,
    /// I2C front-panel display
    pub oled: Oled,
    /// Tone output on PB6
    pub buzzer: Buzzer,
    /// Potentiometer inputs
    pub adc: Adc,
    /// Second periodic timer for the latency sampler
    pub service_timer: ServiceTimer,
}

/// Clock speed defaults
static mut CLOCKS: Clocks = Clocks {
    osc: Hertz(SYSTEM_CLOCK_HZ),
    sysclk: Hertz(SYSTEM_CLOCK_HZ),
};

/// Get the current clock rate of the CPU
pub fn clocks() -> &'static Clocks {
    unsafe { &*core::ptr::addr_of!(CLOCKS) }
}

impl Board {
    // Initialize peripherals
    pub(crate) fn new() -> Board {
        let core_peripherals = match tm4c123x_hal::CorePeripherals::take() {
            Some(x) => x,
            None => loop {}, // This error occurs before the panic handler could even work
        };
        let peripherals = match tm4c123x_hal::Peripherals::take() {
            Some(x) => x,
            None => loop {}, // This error occurs before the panic handler could even work
        };

        let mut sysctl = peripherals.SYSCTL.constrain();

        // Clocks: main crystal straight through, no PLL
        sysctl.clock_setup.oscillator = Oscillator::Main(
            CrystalFrequency::_16mhz,
            SystemClock::UseOscillator(Divider::_1),
        );
        unsafe {
            CLOCKS = sysctl.clock_setup.freeze();
        }

        // UART0
        let mut pins_a = peripherals.GPIO_PORTA.split(&sysctl.power_control);
        let uart = Serial::uart0(
            peripherals.UART0,
            pins_a.pa1.into_af_push_pull::<AF1>(&mut pins_a.control),
            pins_a.pa0.into_af_push_pull::<AF1>(&mut pins_a.control),
            (),
            (),
            Bps(BAUD_RATE),
            serial::NewlineMode::Binary,
            clocks(),
            &sysctl.power_control,
        );

        // LED and buttons
        let mut pins_f = peripherals.GPIO_PORTF.split(&sysctl.power_control);
        let led = pins_f.pf2.into_push_pull_output();
        let buttons = LaunchpadButtons {
            sw1: pins_f.pf4.into_pull_up_input(),
            sw2: pins_f.pf0.unlock(&mut pins_f.control).into_pull_up_input(),
        };

        // Port B: stepper coils, I2C0 and the PWM tone pin
        let mut pins_b = peripherals.GPIO_PORTB.split(&sysctl.power_control);
        let coils = CoilPins {
            a: pins_b.pb0.into_push_pull_output(),
            b: pins_b.pb1.into_push_pull_output(),
            c: pins_b.pb4.into_push_pull_output(),
            d: pins_b.pb5.into_push_pull_output(),
        };
        let i2c = I2c::i2c0(
            peripherals.I2C0,
            (
                pins_b.pb2.into_af_push_pull::<AF3>(&mut pins_b.control),
                pins_b.pb3.into_af_open_drain::<AF3, PullUp>(&mut pins_b.control),
            ),
            400_000.hz(),
            clocks(),
            &sysctl.power_control,
        );
        let oled = Oled::new(i2c);
        let buzzer = Buzzer::new(
            peripherals.PWM0,
            pins_b.pb6.into_af_push_pull::<AF4>(&mut pins_b.control),
            &sysctl.power_control,
        );

        // Potentiometers on AIN4..=6 (PD3, PD2, PD1)
        let pins_d = peripherals.GPIO_PORTD.split(&sysctl.power_control);
        let adc = Adc::new(
            peripherals.ADC0,
            (
                pins_d.pd3.into_floating_input(),
                pins_d.pd2.into_floating_input(),
                pins_d.pd1.into_floating_input(),
            ),
            &sysctl.power_control,
            OverSampleMultiplier::_4x,
        );

        let service_timer = ServiceTimer::new(peripherals.TIMER1, &sysctl.power_control);
        let systick = SysTickTimer::new(core_peripherals.SYST);

        Board {
            systick,
            power_control: sysctl.power_control,
            uart,
            led,
            buttons,
            coils,
            oled,
            buzzer,
            adc,
            service_timer,
        }
    }
}

/// Busy-wait delay on the core clock. Leaves SysTick free for the lab tick.
pub struct SpinDelay;

impl DelayMs<u32> for SpinDelay {
    fn delay_ms(&mut self, ms: u32) {
        let cycles_per_ms = clocks().sysclk.0 / 1_000;
        for _ in 0..ms {
            cortex_m::asm::delay(cycles_per_ms);
        }
    }
}

/// SW1 (PF4) and SW2 (PF0), active low
pub struct LaunchpadButtons {
    sw1: PF4<Input<PullUp>>,
    sw2: PF0<Input<PullUp>>,
}

impl ButtonPad for LaunchpadButtons {
    fn pressed(&mut self) -> Option<Button> {
        if self.sw1.is_low().unwrap_or_default() {
            Some(Button::Left)
        } else if self.sw2.is_low().unwrap_or_default() {
            Some(Button::Right)
        } else {
            None
        }
    }
}

/// Stepper driver inputs A through D
pub struct CoilPins {
    a: PB0<Output<PushPull>>,
    b: PB1<Output<PushPull>>,
    c: PB4<Output<PushPull>>,
    d: PB5<Output<PushPull>>,
}

fn drive<P: OutputPin>(pin: &mut P, level: bool) {
    let _ = if level { pin.set_high() } else { pin.set_low() };
}

impl PinBank for CoilPins {
    fn set_output(&mut self, pin: usize, level: bool) {
        match pin {
            0 => drive(&mut self.a, level),
            1 => drive(&mut self.b, level),
            2 => drive(&mut self.c, level),
            3 => drive(&mut self.d, level),
            _ => {}
        }
    }
}

/// Unrecoverable error; blink the red LED until reset
pub fn safe() -> ! {
    let p = unsafe { tm4c123x_hal::Peripherals::steal() };
    let pins = p.GPIO_PORTF.split(&p.SYSCTL.constrain().power_control);

    let mut delay = SpinDelay;
    let mut led = pins.pf1.into_push_pull_output();
    loop {
        led.set_high().unwrap_or_default();
        delay.delay_ms(200u32);
        led.set_low().unwrap_or_default();
        delay.delay_ms(200u32);
    }
}
