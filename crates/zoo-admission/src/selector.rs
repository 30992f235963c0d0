//! Bounded interactive selection.
//!
//! [`BoundedRetrySelector::select`] reads an ID, checks it against a
//! candidate set, and asks for confirmation. An unknown ID or a declined
//! confirmation costs one attempt. When attempts run out, or input ends,
//! the result is [`Selection::Cancelled`] with the attempts actually spent,
//! which callers treat as a cancellation rather than a failure.

use std::collections::{BTreeMap, VecDeque};
use std::io;

/// Attempts a selector allows unless configured otherwise.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Line-oriented console access.
///
/// The console binary implements this over stdin/stdout;
/// [`ScriptedPrompter`] replays canned answers.
pub trait Prompter {
    /// Show `prompt` and read one line. `None` once input is exhausted.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Ask a yes/no question. Anything but an affirmative answer is "no".
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error.
    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        Ok(self
            .read_line(&format!("{question} [y/N] "))?
            .is_some_and(|answer| is_affirmative(&answer)))
    }

    /// Print an informational line.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error.
    fn notify(&mut self, message: &str) -> io::Result<()>;
}

/// `y` or `yes`, case-insensitive, surrounding whitespace ignored.
#[must_use]
pub fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim();
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}

/// Replays a fixed list of answers and records everything shown.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    transcript: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, A>(answers: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            transcript: Vec::new(),
        }
    }

    /// Prompts and notices shown so far, in order.
    #[must_use]
    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompter for ScriptedPrompter {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.transcript.push(prompt.to_string());
        Ok(self.answers.pop_front())
    }

    fn notify(&mut self, message: &str) -> io::Result<()> {
        self.transcript.push(message.to_string());
        Ok(())
    }
}

/// Outcome of one [`BoundedRetrySelector::select`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Chosen(String),
    /// No choice was confirmed; `attempts` counts the ones consumed.
    Cancelled { attempts: u32 },
}

impl Selection {
    #[must_use]
    pub fn chosen(&self) -> Option<&str> {
        match self {
            Self::Chosen(id) => Some(id),
            Self::Cancelled { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundedRetrySelector {
    max_attempts: u32,
}

impl Default for BoundedRetrySelector {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}

impl BoundedRetrySelector {
    /// A bound of zero is raised to one.
    #[must_use]
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Let the user pick one of `candidates` (ID to display label).
    ///
    /// Input ending mid-selection cancels without consuming the open attempt.
    ///
    /// # Errors
    ///
    /// Returns an I/O error from the prompter.
    pub fn select<P: Prompter + ?Sized>(
        &self,
        prompter: &mut P,
        prompt: &str,
        candidates: &BTreeMap<String, String>,
    ) -> io::Result<Selection> {
        for attempt in 1..=self.max_attempts {
            let Some(raw) = prompter.read_line(&format!("{prompt}: "))? else {
                tracing::debug!(attempt, "input closed during selection");
                return Ok(Selection::Cancelled {
                    attempts: attempt - 1,
                });
            };
            let id = raw.trim();

            match candidates.get(id) {
                Some(label) => {
                    prompter.notify(&format!("{id}: {label}"))?;
                    if prompter.confirm(&format!("Select {id}?"))? {
                        return Ok(Selection::Chosen(id.to_string()));
                    }
                    tracing::debug!(attempt, %id, "selection declined");
                }
                None => {
                    prompter.notify(&format!("'{id}' is not one of the available choices."))?;
                    tracing::debug!(attempt, %id, "selection not found");
                }
            }
        }
        Ok(Selection::Cancelled {
            attempts: self.max_attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn foxes() -> BTreeMap<String, String> {
        BTreeMap::from([
            ("A-0001".to_string(), "Vixen (fox)".to_string()),
            ("A-0002".to_string(), "Reynard (fox)".to_string()),
        ])
    }

    #[test]
    fn unknown_then_declined_then_confirmed() {
        let mut prompter = ScriptedPrompter::new(["X-9999", "A-0001", "n", "A-0001", "y"]);
        let picked = BoundedRetrySelector::default()
            .select(&mut prompter, "Animal ID", &foxes())
            .unwrap();

        assert_eq!(picked.chosen(), Some("A-0001"));
        assert_eq!(prompter.remaining(), 0);
    }

    #[test]
    fn three_invalid_inputs_give_up() {
        let mut prompter = ScriptedPrompter::new(["nope", "A-9", "E-0001", "A-0001", "y"]);
        let picked = BoundedRetrySelector::default()
            .select(&mut prompter, "Animal ID", &foxes())
            .unwrap();

        assert_eq!(picked, Selection::Cancelled { attempts: 3 });
        assert_eq!(prompter.remaining(), 2);
    }

    #[test]
    fn first_confirmed_choice_stops_early() {
        let mut prompter = ScriptedPrompter::new([" A-0002 ", "yes", "A-0001", "y"]);
        let picked = BoundedRetrySelector::default()
            .select(&mut prompter, "Animal ID", &foxes())
            .unwrap();

        assert_eq!(picked, Selection::Chosen("A-0002".to_string()));
        assert_eq!(prompter.remaining(), 2);
    }

    #[rstest]
    #[case::before_any_answer(Vec::new(), 0)]
    #[case::after_one_unknown(vec!["X-1"], 1)]
    #[case::unanswered_confirmation_declines(vec!["X-1", "A-0001"], 2)]
    #[case::after_a_decline(vec!["A-0001", "n"], 1)]
    fn closed_input_counts_only_spent_attempts(#[case] answers: Vec<&str>, #[case] spent: u32) {
        let mut prompter = ScriptedPrompter::new(answers);
        let picked = BoundedRetrySelector::new(5)
            .select(&mut prompter, "Animal ID", &foxes())
            .unwrap();
        assert_eq!(picked, Selection::Cancelled { attempts: spent });
    }

    #[test]
    fn zero_bound_still_allows_one_attempt() {
        let selector = BoundedRetrySelector::new(0);
        assert_eq!(selector.max_attempts(), 1);
        let mut prompter = ScriptedPrompter::new(["A-0001", "y"]);
        assert!(selector.select(&mut prompter, "ID", &foxes()).unwrap().chosen().is_some());
    }

    #[rstest]
    #[case("y", true)]
    #[case("YES", true)]
    #[case(" Yes ", true)]
    #[case("n", false)]
    #[case("", false)]
    #[case("yep", false)]
    fn affirmative_answers(#[case] answer: &str, #[case] expected: bool) {
        assert_eq!(is_affirmative(answer), expected);
    }
}
