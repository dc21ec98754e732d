use std::fs;
use std::io::Cursor;
use std::path::Path;

use atm_ledger::{
    AtmConfig, AtmError, Confirmation, Money, Outcome, Processor, Request, ValidationError,
    app::Terminal,
    common::config::StorageConfig,
    io::ledger::NO_TRANSACTIONS,
};

fn processor(root: &Path) -> Processor {
    let config = AtmConfig {
        storage: StorageConfig {
            accounts_dir: root.join("users"),
            ledger_dir: root.join("transactions"),
            ..StorageConfig::default()
        },
        ..AtmConfig::default()
    };
    Processor::from_config(&config).expect("failed to open stores")
}

fn yes(_: &Confirmation) -> bool {
    true
}

fn deposit(amount: &str) -> Request {
    Request::Deposit {
        amount: amount.to_string(),
    }
}

fn withdraw(amount: &str) -> Request {
    Request::Withdraw {
        amount: amount.to_string(),
    }
}

fn ledger_text(root: &Path, id: &str) -> String {
    fs::read_to_string(root.join("transactions").join(format!("{id}_log.txt"))).unwrap_or_default()
}

#[test]
fn case1_fresh_account_deposit_withdraw_and_cap() {
    let tmp = tempfile::tempdir().unwrap();
    let atm = processor(tmp.path());

    let mut session = atm.authenticate("A1", "5678").unwrap();
    assert_eq!(session.balance(), Money::new(250_000));
    assert_eq!(
        fs::read_to_string(tmp.path().join("users").join("A1.txt")).unwrap(),
        "5678\n250000"
    );

    let outcome = atm.process(&mut session, deposit("5000"), &mut yes).unwrap();
    assert_eq!(
        outcome,
        Outcome::Deposited {
            amount: Money::new(5_000),
            balance: Money::new(255_000),
        }
    );
    let log = ledger_text(tmp.path(), "A1");
    assert_eq!(log.lines().count(), 1);
    assert!(log.contains("Deposit: Rs.5000"));
    assert!(log.contains("Balance: Rs.255000"));

    atm.process(&mut session, withdraw("25000"), &mut yes).unwrap();
    assert_eq!(session.balance(), Money::new(230_000));

    let err = atm
        .process(&mut session, withdraw("30000"), &mut yes)
        .unwrap_err();
    assert!(matches!(
        err,
        AtmError::Validation(ValidationError::ExceedsCap { .. })
    ));
    assert_eq!(session.balance(), Money::new(230_000));

    let log = ledger_text(tmp.path(), "A1");
    let lines: Vec<&str> = log.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(
        lines[0].ends_with(" | Deposit: Rs.5000 | Balance: Rs.255000")
    );
    assert!(
        lines[1].ends_with(" | Withdraw: Rs.25000 | Balance: Rs.230000")
    );

    atm.exit(session).unwrap();
    let session = atm.authenticate("A1", "5678").unwrap();
    assert_eq!(session.balance(), Money::new(230_000));
}

#[test]
fn case2_rejections_change_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let atm = processor(tmp.path());
    let mut session = atm.authenticate("B2", "5678").unwrap();

    // drain the account to make the funds check reachable under the cap
    for _ in 0..10 {
        atm.process(&mut session, withdraw("25000"), &mut yes).unwrap();
    }
    assert_eq!(session.balance(), Money::zero());
    let before = ledger_text(tmp.path(), "B2");

    for request in [withdraw("5"), withdraw("13"), deposit("13"), deposit("0"), deposit("x")] {
        let err = atm.process(&mut session, request, &mut yes).unwrap_err();
        assert!(matches!(err, AtmError::Validation(_)), "{err}");
    }

    assert_eq!(session.balance(), Money::zero());
    assert_eq!(ledger_text(tmp.path(), "B2"), before);
}

#[test]
fn case3_pin_change_survives_restart_and_keeps_history() {
    let tmp = tempfile::tempdir().unwrap();

    {
        let atm = processor(tmp.path());
        let mut session = atm.authenticate("C3", "5678").unwrap();
        atm.process(&mut session, deposit("100"), &mut yes).unwrap();
        atm.process(
            &mut session,
            Request::ChangePin {
                current: "5678".into(),
                new: "13579".into(),
                confirm: "13579".into(),
            },
            &mut yes,
        )
        .unwrap();
        atm.exit(session).unwrap();
    }

    let atm = processor(tmp.path());
    assert!(matches!(
        atm.authenticate("C3", "5678"),
        Err(AtmError::Authentication { .. })
    ));
    let mut session = atm.authenticate("C3", "13579").unwrap();
    assert_eq!(session.balance(), Money::new(250_100));

    match atm.process(&mut session, Request::History, &mut yes).unwrap() {
        Outcome::History(text) => assert!(text.contains("Deposit: Rs.100 | Balance: Rs.250100")),
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn case4_accounts_are_isolated() {
    let tmp = tempfile::tempdir().unwrap();
    let atm = processor(tmp.path());

    let mut first = atm.authenticate("D1", "5678").unwrap();
    atm.process(&mut first, deposit("500"), &mut yes).unwrap();

    let mut second = atm.authenticate("D2", "5678").unwrap();
    assert_eq!(second.balance(), Money::new(250_000));
    assert_eq!(
        atm.process(&mut second, Request::History, &mut yes).unwrap(),
        Outcome::History(NO_TRANSACTIONS.to_string())
    );
}

#[test]
fn case5_scripted_terminal_session() {
    let tmp = tempfile::tempdir().unwrap();
    let atm = processor(tmp.path());
    let script = fs::read_to_string("tests/fixtures/scenario_session.txt").unwrap();

    let mut terminal = Terminal::new(Cursor::new(script.into_bytes()), Vec::new());
    terminal.run(&atm).unwrap();
    let screen = String::from_utf8(terminal.into_output()).unwrap();

    assert!(screen.contains("Your new balance is Rs.255000/-"));
    assert!(screen.contains("Your new balance is Rs.230000/-"));
    assert!(
        screen.contains("Error: maximum withdrawal is Rs.25000 per transaction")
    );
    assert!(screen.contains("Your current balance is Rs. 230000/-"));

    assert_eq!(
        fs::read_to_string(tmp.path().join("users").join("A1.txt")).unwrap(),
        "5678\n230000"
    );
    assert_eq!(ledger_text(tmp.path(), "A1").lines().count(), 2);
}
