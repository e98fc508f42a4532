//! Line-oriented command menu over any async reader and writer.

use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};
use tracing::debug;

use powerball_core::{Lottery, RecurrenceLimit, MAX_TARGET};

use crate::metrics;

const HELP: &str = "\
Enter the letter for the corresponding command from the list:
[g] - Draw a new random winning ticket.
[r] - Generate a chosen number of random tickets.
[w] - Show the winning ticket.
[v] - View generated tickets.
[d] - Delete all generated tickets.
[l] - Set a new recurrence limit.
[m] - Show metrics.
[h] - View command list.
[e] - Exit.
";

const EXIT_MESSAGE: &str = "Exiting Powerball lottery simulator.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    DrawWinning,
    Generate,
    ShowWinning,
    ViewTickets,
    DeleteTickets,
    SetLimit,
    Metrics,
    Help,
    Exit,
}

impl Command {
    fn parse(input: &str) -> Option<Self> {
        match input.to_ascii_lowercase().as_str() {
            "g" => Some(Self::DrawWinning),
            "r" => Some(Self::Generate),
            "w" => Some(Self::ShowWinning),
            "v" => Some(Self::ViewTickets),
            "d" => Some(Self::DeleteTickets),
            "l" => Some(Self::SetLimit),
            "m" => Some(Self::Metrics),
            "h" => Some(Self::Help),
            "e" => Some(Self::Exit),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::DrawWinning => "draw_winning",
            Self::Generate => "generate",
            Self::ShowWinning => "show_winning",
            Self::ViewTickets => "view_tickets",
            Self::DeleteTickets => "delete_tickets",
            Self::SetLimit => "set_limit",
            Self::Metrics => "metrics",
            Self::Help => "help",
            Self::Exit => "exit",
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Interactive menu driving a [`Lottery`] session.
pub struct Menu<R, W> {
    lines: Lines<R>,
    out: W,
}

impl<R, W> Menu<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(input: R, out: W) -> Self {
        Self {
            lines: input.lines(),
            out,
        }
    }

    /// Handle commands until `e` or end of input.
    pub async fn run(&mut self, lottery: &mut Lottery) -> io::Result<()> {
        self.write(HELP).await?;

        while let Some(line) = self.lines.next_line().await? {
            let input = line.trim();
            if input.is_empty() {
                continue;
            }

            let Some(command) = Command::parse(input) else {
                self.say(&format!(
                    "Unknown command {:?}; enter h for the command list.",
                    input
                ))
                .await?;
                continue;
            };

            debug!(command = command.name(), "Menu command");
            metrics::COMMANDS_TOTAL
                .with_label_values(&[command.name()])
                .inc();

            if self.dispatch(command, lottery).await? == Flow::Exit {
                break;
            }
        }

        self.say(EXIT_MESSAGE).await?;
        self.out.flush().await
    }

    async fn dispatch(&mut self, command: Command, lottery: &mut Lottery) -> io::Result<Flow> {
        match command {
            Command::DrawWinning => {
                let ticket = lottery.draw_winning();
                self.say(&format!("A new winning ticket has been drawn: {}", ticket))
                    .await?;
            }
            Command::Generate => return self.generate(lottery).await,
            Command::ShowWinning => {
                self.say(&format!(
                    "The current winning ticket is: {}",
                    lottery.show_winning()
                ))
                .await?;
            }
            Command::ViewTickets => self.view_tickets(lottery).await?,
            Command::DeleteTickets => {
                lottery.clear_tickets();
                self.say("All generated tickets have been cleared.").await?;
            }
            Command::SetLimit => return self.set_limit(lottery).await,
            Command::Metrics => {
                metrics::collect_dynamic_metrics(lottery);
                self.write(&metrics::encode_metrics()).await?;
            }
            Command::Help => self.write(HELP).await?,
            Command::Exit => return Ok(Flow::Exit),
        }
        Ok(Flow::Continue)
    }

    async fn generate(&mut self, lottery: &Lottery) -> io::Result<Flow> {
        self.say("Enter the amount of tickets to generate:").await?;
        let Some(answer) = self.lines.next_line().await? else {
            return Ok(Flow::Exit);
        };

        let target = match answer.trim().parse::<usize>() {
            Ok(target) if (1..=MAX_TARGET).contains(&target) => target,
            _ => {
                self.say(&format!(
                    "Invalid input; value must be a whole number from 1 to {}.",
                    MAX_TARGET
                ))
                .await?;
                return Ok(Flow::Continue);
            }
        };

        if target < lottery.ticket_count() {
            self.say("Desired amount is below the current number of tickets; clearing them first.")
                .await?;
        }
        self.say("Computing...").await?;

        match lottery.generate_tickets(target).await {
            Ok(_) => self.say("Ticket generation complete.").await?,
            Err(e) => self.say(&format!("ERROR: {}", e)).await?,
        }
        self.say(&format!(
            "The current number of tickets is: {}",
            lottery.ticket_count()
        ))
        .await?;
        Ok(Flow::Continue)
    }

    async fn view_tickets(&mut self, lottery: &Lottery) -> io::Result<()> {
        let tickets = lottery.tickets();
        if tickets.is_empty() {
            return self.say("No tickets generated yet!").await;
        }

        let mut listing = String::new();
        for ticket in &tickets {
            listing.push_str(&ticket.to_string());
            listing.push('\n');
        }
        self.write(&listing).await?;
        self.say(&format!(
            "The current number of tickets is: {}",
            tickets.len()
        ))
        .await
    }

    async fn set_limit(&mut self, lottery: &mut Lottery) -> io::Result<Flow> {
        self.say(&format!(
            "The current recurrence limit is: {}",
            lottery.recurrence_limit()
        ))
        .await?;
        self.say("Enter a new integer (3, 4, or 5) as the new recurrence limit:")
            .await?;
        let Some(answer) = self.lines.next_line().await? else {
            return Ok(Flow::Exit);
        };

        let limit = answer
            .trim()
            .parse::<u8>()
            .ok()
            .and_then(|raw| RecurrenceLimit::new(raw).ok());
        match limit {
            Some(limit) => {
                lottery.set_recurrence_limit(limit);
                self.say(&format!("Recurrence limit has been set to {}.", limit))
                    .await?;
            }
            None => {
                self.say("Invalid input; value must be an integer 3, 4, or 5. Returning to main menu.")
                    .await?;
            }
        }
        Ok(Flow::Continue)
    }

    async fn say(&mut self, line: &str) -> io::Result<()> {
        self.out.write_all(line.as_bytes()).await?;
        self.out.write_all(b"\n").await?;
        self.out.flush().await
    }

    async fn write(&mut self, text: &str) -> io::Result<()> {
        self.out.write_all(text.as_bytes()).await?;
        self.out.flush().await
    }
}
