use std::io::{BufRead, Write};

use crate::{
    common::{
        error::AtmError,
        event::{Confirm, Confirmation, Outcome, Request},
        money::Money,
    },
    domain::{session::Session, transaction::Action},
    worker::processor::Processor,
};

const MENU: &str = "\
Main Menu
  1. Balance Inquiry
  2. Withdraw
  3. Deposit
  4. Change PIN
  5. Transaction History
  6. Exit
";

/// Line-oriented ATM screen over any reader/writer pair: a login prompt,
/// then a menu loop until the user exits or input ends.
pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs one login and menu session. End of input at any prompt ends the
    /// session; an authenticated session is saved before returning.
    pub fn run(&mut self, atm: &Processor) -> Result<(), AtmError> {
        writeln!(self.output, "Welcome to the ATM")?;
        let Some(mut session) = self.login(atm)? else {
            return Ok(());
        };

        loop {
            write!(self.output, "\n{MENU}")?;
            let Some(choice) = self.prompt("Select option: ")? else {
                break;
            };
            let request = match choice.as_str() {
                "1" => Request::BalanceInquiry,
                "2" => match self.amount_request(atm, Action::Withdraw)? {
                    Some(request) => request,
                    None => continue,
                },
                "3" => match self.amount_request(atm, Action::Deposit)? {
                    Some(request) => request,
                    None => continue,
                },
                "4" => match self.pin_request()? {
                    Some(request) => request,
                    None => continue,
                },
                "5" => Request::History,
                "6" => break,
                _ => {
                    writeln!(self.output, "Invalid option.")?;
                    continue;
                }
            };
            self.submit(atm, &mut session, request)?;
        }

        atm.exit(session)?;
        writeln!(self.output, "Thank you for banking with us.")?;
        Ok(())
    }

    fn login(&mut self, atm: &Processor) -> Result<Option<Session>, AtmError> {
        loop {
            writeln!(self.output, "\nSecure Login")?;
            let Some(id) = self.prompt("Account ID: ")? else {
                return Ok(None);
            };
            let Some(pin) = self.prompt("PIN: ")? else {
                return Ok(None);
            };
            if id.is_empty() || pin.is_empty() {
                writeln!(self.output, "Error: Please enter both Account ID and PIN")?;
                continue;
            }

            match atm.authenticate(&id, &pin) {
                Ok(session) => {
                    writeln!(self.output, "Logged in as: {}", session.id())?;
                    return Ok(Some(session));
                }
                Err(AtmError::Authentication { .. }) => {
                    writeln!(self.output, "Error: Incorrect PIN")?;
                }
                Err(err @ AtmError::Terminal(_)) => return Err(err),
                Err(err) => {
                    writeln!(self.output, "Error: Authentication failed: {err}")?;
                }
            }
        }
    }

    fn amount_request(
        &mut self,
        atm: &Processor,
        action: Action,
    ) -> Result<Option<Request>, AtmError> {
        let limits = atm.limits();
        let text = format!(
            "Enter amount (multiples of {}, max Rs.{}): ",
            limits.amount_multiple,
            group_thousands(limits.cap_for(action))
        );
        let Some(amount) = self.prompt(&text)? else {
            return Ok(None);
        };
        if amount.is_empty() {
            return Ok(None);
        }
        Ok(Some(match action {
            Action::Deposit => Request::Deposit { amount },
            Action::Withdraw => Request::Withdraw { amount },
        }))
    }

    fn pin_request(&mut self) -> Result<Option<Request>, AtmError> {
        let mut answers = Vec::with_capacity(3);
        for text in ["Enter current PIN: ", "Enter new PIN: ", "Confirm new PIN: "] {
            match self.prompt(text)? {
                Some(answer) if !answer.is_empty() => answers.push(answer),
                _ => return Ok(None),
            }
        }
        let confirm = answers.pop().unwrap_or_default();
        let new = answers.pop().unwrap_or_default();
        let current = answers.pop().unwrap_or_default();
        Ok(Some(Request::ChangePin {
            current,
            new,
            confirm,
        }))
    }

    fn submit(
        &mut self,
        atm: &Processor,
        session: &mut Session,
        request: Request,
    ) -> Result<(), AtmError> {
        match atm.process(session, request, self) {
            Ok(outcome) => self.show(session, outcome),
            Err(err @ AtmError::Terminal(_)) => Err(err),
            Err(err) if err.is_recoverable() => {
                writeln!(self.output, "Error: {err}")?;
                Ok(())
            }
            Err(err) => {
                writeln!(self.output, "Error: operation failed: {err}")?;
                Ok(())
            }
        }
    }

    fn show(&mut self, session: &Session, outcome: Outcome) -> Result<(), AtmError> {
        match outcome {
            Outcome::Withdrawn { amount, balance } => writeln!(
                self.output,
                "Rs.{amount} successfully withdrawn.\nYour new balance is Rs.{balance}/-"
            )?,
            Outcome::Deposited { amount, balance } => writeln!(
                self.output,
                "Rs.{amount} successfully deposited.\nYour new balance is Rs.{balance}/-"
            )?,
            Outcome::Cancelled => writeln!(self.output, "Transaction cancelled.")?,
            Outcome::PinChanged => writeln!(self.output, "PIN changed successfully")?,
            Outcome::Balance(inquiry) => writeln!(
                self.output,
                "Your current balance is Rs. {}/-\nAvailable for withdrawal: Rs. {}/-",
                inquiry.balance, inquiry.available_to_withdraw
            )?,
            Outcome::History(text) => {
                let id = session.id();
                writeln!(self.output, "Transaction History - Account: {id}")?;
                write!(self.output, "{text}")?;
                if !text.ends_with('\n') {
                    writeln!(self.output)?;
                }
            }
        }
        Ok(())
    }

    /// Prints `text`, reads one line and strips surrounding whitespace.
    /// Returns `None` at end of input.
    fn prompt(&mut self, text: &str) -> Result<Option<String>, AtmError> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

impl<R: BufRead, W: Write> Confirm for Terminal<R, W> {
    /// Shows the pending operation and waits for `y`/`yes`. Anything else,
    /// including end of input or a read failure, cancels.
    fn confirm(&mut self, pending: &Confirmation) -> bool {
        let verb = match pending.action {
            Action::Deposit => "Deposit",
            Action::Withdraw => "Withdraw",
        };
        let shown = writeln!(
            self.output,
            "{verb} Rs.{}?\nCurrent balance: Rs.{}\nNew balance: Rs.{}",
            pending.amount, pending.current_balance, pending.new_balance
        );
        if shown.is_err() {
            return false;
        }
        match self.prompt("Confirm (y/n): ") {
            Ok(Some(answer)) => matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes"),
            _ => false,
        }
    }
}

/// `25000` -> `25,000`.
fn group_thousands(amount: Money) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::common::config::{AccountDefaults, AtmConfig, StorageConfig};

    fn processor(root: &std::path::Path) -> Processor {
        let config = AtmConfig {
            storage: StorageConfig {
                accounts_dir: root.join("users"),
                ledger_dir: root.join("transactions"),
                ..StorageConfig::default()
            },
            defaults: AccountDefaults::default(),
            ..AtmConfig::default()
        };
        Processor::from_config(&config).unwrap()
    }

    fn run_script(atm: &Processor, script: &str) -> String {
        let mut terminal = Terminal::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
        terminal.run(atm).unwrap();
        String::from_utf8(terminal.into_output()).unwrap()
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(group_thousands(Money::new(5)), "5");
        assert_eq!(group_thousands(Money::new(25_000)), "25,000");
        assert_eq!(group_thousands(Money::new(90_000)), "90,000");
        assert_eq!(group_thousands(Money::new(1_234_567)), "1,234,567");
    }

    #[test]
    fn login_retries_until_pin_matches() {
        let tmp = tempfile::tempdir().unwrap();
        let atm = processor(tmp.path());

        let out = run_script(&atm, "A1\n\n A1 \n0000\nA1\n5678\n6\n");

        assert!(out.contains("Error: Please enter both Account ID and PIN"));
        assert!(out.contains("Error: Incorrect PIN"));
        assert!(out.contains("Logged in as: A1"));
        assert!(out.contains("Thank you for banking with us."));
    }

    #[test]
    fn invalid_account_id_is_reported_at_login() {
        let tmp = tempfile::tempdir().unwrap();
        let atm = processor(tmp.path());

        let out = run_script(&atm, "../x\n5678\n");
        assert!(
            out.contains("Error: Authentication failed: invalid account id")
        );
    }

    #[test]
    fn withdraw_prompt_shows_cap_and_confirmation() {
        let tmp = tempfile::tempdir().unwrap();
        let atm = processor(tmp.path());

        let out = run_script(&atm, "A1\n5678\n2\n1000\ny\n6\n");

        assert!(
            out.contains("Enter amount (multiples of 5, max Rs.25,000): ")
        );
        assert!(out.contains(
            "Withdraw Rs.1000?\nCurrent balance: Rs.250000\nNew balance: Rs.249000"
        ));
        assert!(out.contains(
            "Rs.1000 successfully withdrawn.\nYour new balance is Rs.249000/-"
        ));
    }

    #[test]
    fn declining_confirmation_cancels() {
        let tmp = tempfile::tempdir().unwrap();
        let atm = processor(tmp.path());

        let out = run_script(&atm, "A1\n5678\n3\n500\nn\n1\n6\n");

        assert!(out.contains("max Rs.90,000"));
        assert!(out.contains("Transaction cancelled."));
        assert!(out.contains("Your current balance is Rs. 250000/-"));
    }

    #[test]
    fn validation_errors_are_shown_and_menu_continues() {
        let tmp = tempfile::tempdir().unwrap();
        let atm = processor(tmp.path());

        let out = run_script(&atm, "A1\n5678\n2\n13\n2\nabc\n3\n\n9\n1\n6\n");

        assert!(out.contains("Error: amount must be in multiples of 5"));
        assert!(out.contains("Error: please enter a valid amount"));
        assert!(out.contains("Invalid option."));
        assert!(out.contains("Available for withdrawal: Rs. 25000/-"));
    }

    #[test]
    fn end_of_input_saves_the_session() {
        let tmp = tempfile::tempdir().unwrap();
        let atm = processor(tmp.path());

        let out = run_script(&atm, "A1\n5678\n4\n5678\n4321\n4321\n");
        assert!(out.contains("PIN changed successfully"));

        let record = std::fs::read_to_string(tmp.path().join("users").join("A1.txt")).unwrap();
        assert_eq!(record, "4321\n250000");
    }

    #[test]
    fn history_screen_lists_entries() {
        let tmp = tempfile::tempdir().unwrap();
        let atm = processor(tmp.path());

        let out = run_script(&atm, "A1\n5678\n5\n3\n5000\nyes\n5\n6\n");

        assert!(
            out.contains("Transaction History - Account: A1\nNo transactions yet.\n")
        );
        assert!(out.contains("Deposit: Rs.5000 | Balance: Rs.255000\n"));
    }

    #[test]
    fn storage_failure_is_reported_and_menu_continues() {
        let tmp = tempfile::tempdir().unwrap();
        let atm = processor(tmp.path());
        std::fs::create_dir(tmp.path().join("transactions").join("A1_log.txt")).unwrap();

        let out = run_script(&atm, "A1\n5678\n3\n5000\ny\n1\n6\n");

        assert!(out.contains("Error: operation failed: storage error: "));
        assert!(out.contains("Your current balance is Rs. 255000/-"));
        assert!(out.contains("Thank you for banking with us."));

        let record = std::fs::read_to_string(tmp.path().join("users").join("A1.txt")).unwrap();
        assert_eq!(record, "5678\n255000");
    }
}
