//! Line-oriented rendering of the form.
//!
//! Each field is prompted in form order. An empty answer keeps the current
//! value, so after a failed submission the user only retypes what needs
//! fixing. The state field takes either a list number or an exact region
//! name.

use std::io;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use contactform_shared::constants::APP_NAME;
use contactform_shared::regions::{self, STATES};
use contactform_shared::Field;

use crate::api::ContactApi;
use crate::form::{ContactFormController, SubmitOutcome};

#[derive(Debug)]
pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl<R, W> Terminal<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Drive the form until the user quits or input ends.
    pub async fn run<A: ContactApi>(&mut self, controller: &ContactFormController<A>) -> io::Result<()> {
        self.say(&format!("{APP_NAME}\n")).await?;

        loop {
            for field in Field::ALL {
                let current = controller.snapshot().values.get(field).to_string();
                let Some(value) = self.prompt_field(field, &current).await? else {
                    return Ok(());
                };
                controller.change(field, value);
            }

            self.say("Submitting...\n").await?;
            let outcome = controller.submit().await;

            if let Some(message) = controller.snapshot().status.message() {
                self.say(&format!("{message}\n")).await?;
            }

            let question = match outcome {
                SubmitOutcome::Submitted(_) => "Submit another contact? [y/N] ",
                _ => "Press Enter to edit and resubmit, or type q to quit: ",
            };
            self.say(question).await?;

            let Some(answer) = self.read_line().await? else {
                return Ok(());
            };
            let answer = answer.trim().to_ascii_lowercase();

            let again = match outcome {
                SubmitOutcome::Submitted(_) => answer == "y" || answer == "yes",
                _ => answer != "q" && answer != "quit",
            };
            if !again {
                return Ok(());
            }
        }
    }

    async fn prompt_field(&mut self, field: Field, current: &str) -> io::Result<Option<String>> {
        if field == Field::State {
            return self.prompt_state(current).await;
        }

        self.say(&prompt_text(field, current)).await?;
        Ok(self.read_line().await?.map(|line| keep_if_blank(line, current)))
    }

    async fn prompt_state(&mut self, current: &str) -> io::Result<Option<String>> {
        let mut listing = String::new();
        for (i, name) in STATES.iter().enumerate() {
            listing.push_str(&format!("{:>3}. {name}\n", i + 1));
        }
        self.say(&listing).await?;

        loop {
            self.say(&prompt_text(Field::State, current)).await?;
            let Some(line) = self.read_line().await? else {
                return Ok(None);
            };
            let answer = line.trim();

            if answer.is_empty() {
                return Ok(Some(current.to_string()));
            }
            if let Some(name) = answer.parse::<usize>().ok().and_then(regions::region_by_number) {
                return Ok(Some(name.to_string()));
            }
            if regions::is_known_region(answer) {
                return Ok(Some(answer.to_string()));
            }

            self.say(&format!(
                "Unknown state; enter a number from 1 to {}\n",
                STATES.len()
            ))
            .await?;
        }
    }

    async fn say(&mut self, text: &str) -> io::Result<()> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.flush().await
    }

    /// One line without its terminator, or `None` at end of input.
    async fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}

fn prompt_text(field: Field, current: &str) -> String {
    if current.is_empty() {
        format!("{}: ", field.label())
    } else {
        format!("{} [{}]: ", field.label(), current)
    }
}

fn keep_if_blank(line: String, current: &str) -> String {
    if line.trim().is_empty() {
        current.to_string()
    } else {
        line
    }
}
