mod common;

use common::{BareLab, DrawOp, FakeDisplay, FakeLed, FakeSerial, NoDelay};
use tm4c123g_labs::app::{Frontend, LoopState};
use tm4c123g_labs::command::Action;
use tm4c123g_labs::console::{Console, GOODBYE, INVALID, MENU_HEADER};
use tm4c123g_labs::config::LabConfig;
use tm4c123g_labs::dispatch::Dispatcher;
use tm4c123g_labs::display::{Color, Screen};
use tm4c123g_labs::labs::song;
use tm4c123g_labs::state::{Controls, Shared, SystemMode};

fn dispatcher(
    shared: &Shared<Controls>,
) -> (Dispatcher<'_, FakeSerial, FakeDisplay>, FakeSerial, FakeDisplay) {
    let serial = FakeSerial::default();
    let display = FakeDisplay::default();
    let dispatcher = Dispatcher::new(
        song::COMMANDS,
        shared,
        Console::new(serial.clone(), false),
        Screen::new(display.clone()),
    );
    (dispatcher, serial, display)
}

#[test]
fn unbound_symbols_only_echo_and_complain() {
    let shared = Shared::new(song::CONTROLS);
    let (mut dispatcher, serial, display) = dispatcher(&shared);
    shared.lock(|c| {
        c.set_mode(SystemMode::Normal);
        c.playback.step(c.mode.direction());
    });
    let before = shared.snapshot();

    for symbol in 0..=u8::MAX {
        if song::COMMANDS.lookup(symbol).is_some() {
            continue;
        }
        assert_eq!(dispatcher.dispatch(symbol), Action::Invalid);

        let mut expected = vec![symbol];
        expected.extend_from_slice(INVALID.as_bytes());
        assert_eq!(*serial.tx.borrow(), expected);
        serial.tx.borrow_mut().clear();
    }

    assert_eq!(shared.snapshot(), before);
    assert!(display.take_ops().is_empty());
}

#[test]
fn bound_symbols_echo_first_and_always_map_the_same_way() {
    for binding in song::COMMANDS.bindings() {
        let mut actions = Vec::new();
        for _ in 0..2 {
            let shared = Shared::new(song::CONTROLS);
            let (mut dispatcher, serial, _) = dispatcher(&shared);
            actions.push(dispatcher.dispatch(binding.symbol));
            assert_eq!(serial.tx.borrow().first(), Some(&binding.symbol));
        }
        assert_eq!(actions, [binding.action, binding.action]);
    }
}

#[test]
fn lookup_is_case_sensitive() {
    let shared = Shared::new(song::CONTROLS);
    let (mut dispatcher, _, _) = dispatcher(&shared);
    assert_eq!(dispatcher.dispatch(b'n'), Action::Invalid);
    assert_eq!(shared.snapshot().mode, SystemMode::Stopped);
    assert_eq!(
        dispatcher.dispatch(b'N'),
        Action::SetMode(SystemMode::Normal)
    );
    assert_eq!(shared.snapshot().mode, SystemMode::Normal);
}

#[test]
fn quit_says_goodbye_on_both_outputs() {
    let shared = Shared::new(song::CONTROLS);
    let (mut dispatcher, serial, display) = dispatcher(&shared);
    shared.lock(|c| c.set_mode(SystemMode::Normal));

    assert_eq!(dispatcher.dispatch(b'Q'), Action::Quit);
    let controls = shared.snapshot();
    assert!(!controls.running);
    assert_eq!(controls.mode, SystemMode::Stopped);
    assert_eq!(serial.sent(), format!("Q{}", GOODBYE));
    assert!(display.take_ops().iter().any(|op| matches!(
        op,
        DrawOp::Text(text, _, _, Color::Red) if text == "Goodbye"
    )));
}

#[test]
fn menu_lists_every_binding_in_order() {
    let shared = Shared::new(song::CONTROLS);
    let (mut dispatcher, serial, _) = dispatcher(&shared);
    dispatcher.dispatch(b'M');

    let sent = serial.sent();
    let menu = sent.strip_prefix('M').unwrap();
    assert!(menu.starts_with(MENU_HEADER));
    let lines: Vec<&str> = menu[MENU_HEADER.len()..]
        .split("\n\r")
        .filter(|line| !line.is_empty())
        .collect();
    assert_eq!(lines.len(), song::COMMANDS.bindings().len());
    assert_eq!(lines[0], "C - Erase Terminal Window");
    assert_eq!(lines[lines.len() - 1], "- - Decrease Tempo");
}

#[test]
fn trace_reports_state_changes() {
    let shared = Shared::new(song::CONTROLS);
    let serial = FakeSerial::default();
    let mut dispatcher = Dispatcher::new(
        song::COMMANDS,
        &shared,
        Console::new(serial.clone(), true),
        Screen::new(FakeDisplay::default()),
    );

    dispatcher.dispatch(b'R');
    assert_eq!(serial.take_sent(), "R\n\r[trace] Mode(Reverse)");
    dispatcher.dispatch(b'L');
    assert_eq!(serial.take_sent(), "L\n\r[trace] Heartbeat(false)");
    dispatcher.dispatch(b'x');
    assert_eq!(serial.take_sent(), format!("x{}", INVALID));
}

// M, L, L, Q: menu once, heartbeat off then on, one termination, nothing after
#[test]
fn menu_blink_blink_quit() {
    let config = LabConfig {
        splash: false,
        ..song::CONFIG
    };
    let shared = Shared::new(song::CONTROLS);
    let serial = FakeSerial::default();
    let display = FakeDisplay::default();
    let led = FakeLed::default();
    let mut frontend = Frontend::new(
        &shared,
        serial.clone(),
        display.clone(),
        led.clone(),
        BareLab(config),
    );
    frontend.start(&mut NoDelay);
    serial.take_sent();

    serial.type_in(b"M");
    assert_eq!(frontend.poll(), LoopState::Running);
    assert_eq!(serial.take_sent().matches(MENU_HEADER).count(), 1);

    serial.type_in(b"L");
    assert_eq!(frontend.poll(), LoopState::Running);
    assert!(!shared.snapshot().heartbeat);

    serial.type_in(b"L");
    assert_eq!(frontend.poll(), LoopState::Running);
    assert!(shared.snapshot().heartbeat);

    serial.type_in(b"QM");
    assert_eq!(frontend.poll(), LoopState::Exited);
    assert_eq!(frontend.poll(), LoopState::Exited);

    let sent = serial.take_sent();
    assert_eq!(sent.matches(GOODBYE).count(), 1);
    assert!(!sent.contains(MENU_HEADER));
    assert_eq!(serial.unread(), 1);
    assert!(!led.is_high());
    assert!(!shared.snapshot().running);
}

#[test]
fn disabled_heartbeat_keeps_the_led_dark() {
    let shared = Shared::new(song::CONTROLS);
    let led = FakeLed::default();
    let config = LabConfig {
        heartbeat: tm4c123g_labs::config::HeartbeatConfig { on: 1, off: 1 },
        splash: false,
        ..song::CONFIG
    };
    let serial = FakeSerial::default();
    let mut frontend = Frontend::new(
        &shared,
        serial.clone(),
        FakeDisplay::default(),
        led.clone(),
        BareLab(config),
    );

    frontend.poll();
    assert!(led.is_high());

    serial.type_in(b"L");
    for _ in 0..5 {
        frontend.poll();
        assert!(!led.is_high());
    }
}
