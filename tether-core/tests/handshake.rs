mod common;

use common::{drain, output, MockError, MockSerial, RecordingHandler, RecordingIndicator};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tether_core::{Action, ConnectorConfig, Connector, LinkError, RandomCommand};
use tether_protocol::{HostHandshake, HostSettings, HostStep};

fn venus() -> (
    Connector<MockSerial, RecordingIndicator, RandomCommand<SmallRng>>,
    common::Wire,
    std::rc::Rc<std::cell::RefCell<Vec<usize>>>,
) {
    let serial = MockSerial::new();
    let wire = serial.wire.clone();
    let indicator = RecordingIndicator::new(&wire);
    let fired = indicator.fired_at.clone();
    let connector = Connector::from_config(&ConnectorConfig::default(), serial, indicator)
        .with_handler(RandomCommand::new(SmallRng::seed_from_u64(7)));
    (connector, wire, fired)
}

#[test]
fn venus_end_to_end() {
    let (mut connector, wire, fired) = venus();

    connector.uart_mut().host_line("Send your username:");
    assert_eq!(connector.update(), Ok(Some(Action::RespondUsername)));
    assert_eq!(drain(&wire), "Venus\n");
    assert!(!connector.is_authenticated());

    connector.uart_mut().host_line("AUTH_SUCCESS");
    assert_eq!(connector.update(), Ok(Some(Action::ConfirmAuth)));
    assert!(connector.is_authenticated());
    assert_eq!(fired.borrow().len(), 1);
    assert_eq!(drain(&wire), "Authentication confirmed\n");

    connector.uart_mut().host_line("SEND_RANDOM");
    assert_eq!(connector.update(), Ok(Some(Action::Dispatch("SEND_RANDOM"))));
    let reply = drain(&wire);
    let value: u8 = reply
        .strip_prefix("Random: ")
        .and_then(|r| r.strip_suffix('\n'))
        .unwrap()
        .parse()
        .unwrap();
    assert!((1..=99).contains(&value));
}

#[test]
fn send_random_before_auth_is_discarded() {
    let handler = RecordingHandler::default();
    let calls = handler.calls.clone();
    let serial = MockSerial::new();
    let wire = serial.wire.clone();
    let indicator = RecordingIndicator::new(&wire);
    let mut connector = Connector::from_config(&ConnectorConfig::default(), serial, indicator)
        .with_handler(handler);

    connector.uart_mut().host_line("SEND_RANDOM");
    assert_eq!(connector.update(), Ok(Some(Action::Ignore)));
    assert!(wire.borrow().is_empty());
    assert_eq!(calls.get(), 0);
    assert!(!connector.is_authenticated());
}

#[test]
fn indicator_fires_before_acknowledgment() {
    let (mut connector, wire, fired) = venus();

    connector.uart_mut().host_line("Send your username:");
    connector.update().unwrap();
    let before = output(&wire).len();

    connector.uart_mut().host_line("AUTH_SUCCESS");
    connector.update().unwrap();
    assert_eq!(fired.borrow().as_slice(), &[before]);
}

#[test]
fn repeated_grant_blinks_and_acknowledges_each_time() {
    let (mut connector, wire, fired) = venus();

    connector.uart_mut().host_line("AUTH_SUCCESS");
    connector.uart_mut().host_line("AUTH_SUCCESS");
    connector.update().unwrap();
    connector.update().unwrap();

    assert!(connector.is_authenticated());
    assert_eq!(fired.borrow().len(), 2);
    assert_eq!(
        drain(&wire),
        "Authentication confirmed\nAuthentication confirmed\n"
    );
}

#[test]
fn challenge_is_answered_after_auth() {
    let (mut connector, wire, _) = venus();
    connector.process("AUTH_SUCCESS").unwrap();
    drain(&wire);

    assert_eq!(
        connector.process("Send your username:"),
        Ok(Action::RespondUsername)
    );
    assert_eq!(drain(&wire), "Venus\n");
    assert!(connector.is_authenticated());
}

#[test]
fn one_line_per_update() {
    let (mut connector, wire, _) = venus();
    connector.uart_mut().host_line("Send your username:");
    connector.uart_mut().host_line("Send your username:");

    assert_eq!(connector.update(), Ok(Some(Action::RespondUsername)));
    assert_eq!(drain(&wire), "Venus\n");
    assert!(!connector.uart().rx.is_empty());

    assert_eq!(connector.update(), Ok(Some(Action::RespondUsername)));
    assert_eq!(connector.update(), Ok(None));
}

#[test]
fn partial_line_waits_for_terminator() {
    let (mut connector, wire, _) = venus();
    connector.uart_mut().host_bytes(b"AUTH_SUC");
    assert_eq!(connector.update(), Ok(None));
    assert!(!connector.is_authenticated());

    connector.uart_mut().host_bytes(b"CESS\r\n");
    assert_eq!(connector.update(), Ok(Some(Action::ConfirmAuth)));
    assert_eq!(connector.pending_line(), "AUTH_SUCCESS");
    assert_eq!(drain(&wire), "Authentication confirmed\n");
}

#[test]
fn surrounding_whitespace_is_ignored() {
    let (mut connector, wire, _) = venus();
    connector.uart_mut().host_line("  Send your username:\t");
    assert_eq!(connector.update(), Ok(Some(Action::RespondUsername)));
    assert_eq!(drain(&wire), "Venus\n");
}

#[test]
fn literals_are_case_sensitive() {
    let (mut connector, wire, fired) = venus();
    connector.uart_mut().host_line("auth_success");
    connector.uart_mut().host_line("send your username:");
    assert_eq!(connector.update(), Ok(Some(Action::Ignore)));
    assert_eq!(connector.update(), Ok(Some(Action::Ignore)));
    assert!(wire.borrow().is_empty());
    assert!(fired.borrow().is_empty());
    assert!(!connector.is_authenticated());
}

#[test]
fn overlong_line_is_dropped() {
    let (mut connector, wire, _) = venus();
    connector.uart_mut().host_bytes(&[b'A'; 100]);
    connector.uart_mut().host_line("");
    connector.uart_mut().host_line("AUTH_SUCCESS");

    // The oversized line never reaches the state machine
    assert_eq!(connector.update(), Ok(Some(Action::ConfirmAuth)));
    assert_eq!(drain(&wire), "Authentication confirmed\n");
}

#[test]
fn blank_lines_never_reach_the_handler() {
    let handler = RecordingHandler::default();
    let calls = handler.calls.clone();
    let serial = MockSerial::new();
    let wire = serial.wire.clone();
    let indicator = RecordingIndicator::new(&wire);
    let mut connector = Connector::from_config(&ConnectorConfig::default(), serial, indicator)
        .with_handler(handler);

    connector.uart_mut().host_line("AUTH_SUCCESS");
    connector.update().unwrap();
    drain(&wire);

    connector.uart_mut().host_line("   ");
    connector.uart_mut().host_line("");
    connector.uart_mut().host_line("\r");
    for _ in 0..3 {
        assert_eq!(connector.update(), Ok(Some(Action::Ignore)));
    }
    assert_eq!(calls.get(), 0);
    assert!(wire.borrow().is_empty());
    assert!(connector.is_authenticated());
}

#[test]
fn full_length_command_with_crlf_is_delivered() {
    let handler = RecordingHandler::default();
    let seen = handler.seen.clone();
    let serial = MockSerial::new();
    let wire = serial.wire.clone();
    let indicator = RecordingIndicator::new(&wire);
    let mut connector = Connector::from_config(&ConnectorConfig::default(), serial, indicator)
        .with_handler(handler);
    connector.process("AUTH_SUCCESS").unwrap();

    let command = "C".repeat(tether_protocol::MAX_LINE_LEN);
    connector.uart_mut().host_bytes(command.as_bytes());
    connector.uart_mut().host_bytes(b"\r\n");
    assert_eq!(connector.update(), Ok(Some(Action::Dispatch(command.as_str()))));
    assert_eq!(seen.borrow().clone(), vec![command.clone()]);
}

#[test]
fn idle_update_is_a_no_op() {
    let (mut connector, wire, fired) = venus();
    for _ in 0..10 {
        assert_eq!(connector.update(), Ok(None));
    }
    assert!(wire.borrow().is_empty());
    assert!(fired.borrow().is_empty());
}

#[test]
fn send_is_gated_on_authentication() {
    let (mut connector, wire, _) = venus();
    assert_eq!(connector.send("x"), Ok(false));
    assert!(wire.borrow().is_empty());

    connector.process("AUTH_SUCCESS").unwrap();
    drain(&wire);
    assert_eq!(connector.send("x"), Ok(true));
    assert_eq!(drain(&wire), "x\n");
}

#[test]
fn set_handler_replaces_previous() {
    let first = RecordingHandler::default();
    let second = RecordingHandler {
        reply: Some("ok"),
        ..RecordingHandler::default()
    };
    let first_seen = first.seen.clone();
    let second_seen = second.seen.clone();

    let serial = MockSerial::new();
    let wire = serial.wire.clone();
    let indicator = RecordingIndicator::new(&wire);
    let mut connector = Connector::from_config(&ConnectorConfig::default(), serial, indicator)
        .with_handler(first);
    assert!(connector.set_handler(second).is_some());

    connector.process("AUTH_SUCCESS").unwrap();
    drain(&wire);
    connector.process("STATUS").unwrap();

    assert!(first_seen.borrow().is_empty());
    assert_eq!(second_seen.borrow().as_slice(), ["STATUS".to_string()]);
    assert_eq!(drain(&wire), "ok\n");
}

#[test]
fn commands_without_handler_are_ignored() {
    let serial = MockSerial::new();
    let wire = serial.wire.clone();
    let indicator = RecordingIndicator::new(&wire);
    let mut connector = Connector::from_config(&ConnectorConfig::default(), serial, indicator);
    connector.process("AUTH_SUCCESS").unwrap();
    drain(&wire);

    assert!(!connector.has_handler());
    assert_eq!(connector.process("SEND_RANDOM"), Ok(Action::Ignore));
    assert_eq!(connector.dispatch("SEND_RANDOM"), Ok(false));
    assert!(wire.borrow().is_empty());
}

#[test]
fn direct_dispatch_respects_authentication() {
    let handler = RecordingHandler::default();
    let calls = handler.calls.clone();
    let (connector, _, _) = venus();
    let mut connector = connector.with_handler(handler);

    assert_eq!(connector.dispatch("PING"), Ok(false));
    assert_eq!(calls.get(), 0);

    connector.process("AUTH_SUCCESS").unwrap();
    assert_eq!(connector.dispatch("PING"), Ok(true));
    assert_eq!(calls.get(), 1);
}

#[test]
fn transport_errors_surface() {
    let (mut connector, _, _) = venus();
    connector.uart_mut().fail_writes = true;
    connector.uart_mut().host_line("Send your username:");
    assert_eq!(connector.update(), Err(LinkError::Transport(MockError)));
}

#[test]
fn custom_username_is_echoed_exactly() {
    let config = ConnectorConfig::with_username("Red Planet").unwrap();
    let serial = MockSerial::new();
    let wire = serial.wire.clone();
    let indicator = RecordingIndicator::new(&wire);
    let mut connector = Connector::from_config(&config, serial, indicator);

    connector.process("Send your username:").unwrap();
    assert_eq!(drain(&wire), "Red Planet\n");
    assert_eq!(connector.username(), "Red Planet");
}

#[test]
fn host_handshake_accepts_device() {
    let (mut connector, wire, _) = venus();
    let mut host = HostHandshake::new("Venus", HostSettings::default());

    let challenge = host.start(0).unwrap();
    connector.uart_mut().host_line(challenge);
    connector.update().unwrap();

    let reply = drain(&wire);
    assert_eq!(host.on_line(reply.trim(), 10), HostStep::Grant);

    connector.uart_mut().host_line(host.grant_line().unwrap());
    connector.update().unwrap();
    assert!(connector.is_authenticated());
    assert_eq!(drain(&wire), "Authentication confirmed\n");
}

#[test]
fn host_handshake_rejects_wrong_device() {
    let config = ConnectorConfig::with_username("Mars").unwrap();
    let serial = MockSerial::new();
    let wire = serial.wire.clone();
    let indicator = RecordingIndicator::new(&wire);
    let mut connector = Connector::from_config(&config, serial, indicator);
    let mut host = HostHandshake::new("Venus", HostSettings::default());

    connector.uart_mut().host_line(host.start(0).unwrap());
    connector.update().unwrap();
    assert_eq!(host.on_line(drain(&wire).trim(), 10), HostStep::Rejected);
    assert_eq!(host.next_attempt(), Some(3010));
    assert!(!connector.is_authenticated());
}

#[test]
fn works_without_an_indicator() {
    let serial = MockSerial::new();
    let wire = serial.wire.clone();
    let mut connector =
        Connector::from_config(&ConnectorConfig::default(), serial, tether_core::NoIndicator);

    connector.uart_mut().host_line("AUTH_SUCCESS");
    assert_eq!(connector.update(), Ok(Some(Action::ConfirmAuth)));
    assert_eq!(drain(&wire), "Authentication confirmed\n");

    let (serial, _) = connector.release();
    assert!(serial.rx.is_empty());
}
