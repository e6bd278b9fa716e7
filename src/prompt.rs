//! Interactive parameter collection

use anyhow::{bail, Result};
use std::io::{BufRead, Write};
use std::str::FromStr;
use tracing::debug;

use crate::types::SimulationConfig;

/// Question/answer loop over any reader and writer
pub struct Prompter<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Print `text` without a prompt marker
    pub fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{}\n>> ", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            bail!("Input closed while waiting for: {}", question);
        }
        Ok(line.trim().to_string())
    }

    /// Ask until the answer parses as `T`
    pub fn ask_parse<T: FromStr>(&mut self, question: &str) -> Result<T> {
        loop {
            let answer = self.ask(question)?;
            match answer.parse::<T>() {
                Ok(value) => return Ok(value),
                Err(_) => {
                    debug!("Rejected answer {:?}", answer);
                    self.say("Invalid input. Please enter a number.")?;
                }
            }
        }
    }

    /// Ask until the answer is y/yes/n/no
    pub fn ask_yes_no(&mut self, question: &str) -> Result<bool> {
        loop {
            let answer = self.ask(&format!("{}\n'y' for yes\n'n' for no", question))?;
            match answer.to_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => self.say("Invalid input. Please enter 'y' or 'n'.")?,
            }
        }
    }

    /// Ask for every strategy parameter, repeating the form until it validates
    pub fn collect_config(&mut self) -> Result<SimulationConfig> {
        loop {
            let config = SimulationConfig {
                trade_count: self.ask_parse("How many trades would you want to simulate?")?,
                initial_capital: self.ask_parse("Enter your initial capital ($)")?,
                win_rate_pct: self.ask_parse("Enter the win rate % of your strategy")?,
                risk_reward_ratio: self.ask_parse("Enter the risk reward ratio of your strategy")?,
                risk_per_trade_pct: self.ask_parse("Enter the % of total capital risking each trade")?,
            };

            match config.validate() {
                Ok(()) => return Ok(config),
                Err(e) => self.say(&format!("{}. Please try again.", e))?,
            }
        }
    }
}
