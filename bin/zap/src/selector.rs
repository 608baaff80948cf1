use std::io::{self, BufRead, Write};

use zaptv::{Channel, ChannelSelector, ZapResult};

/// Line-oriented channel picker: prints the numbered channel list and reads
/// the chosen number from stdin. An empty line or EOF cancels the selection.
pub struct PromptSelector;

impl ChannelSelector for PromptSelector {
    fn select<F>(&mut self, channels: &[Channel], label: F) -> ZapResult<Option<usize>>
    where
        F: Fn(&Channel) -> String,
    {
        let stdin = io::stdin();
        let mut out = io::stdout();

        for (index, channel) in channels.iter().enumerate() {
            writeln!(out, "{:>4}  {}", index + 1, label(channel))?;
        }

        loop {
            write!(out, "channel [1-{}]: ", channels.len())?;
            out.flush()?;

            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                return Ok(None);
            }
            let line = line.trim();
            if line.is_empty() {
                return Ok(None);
            }

            match line.parse::<usize>() {
                Ok(choice) if (1..=channels.len()).contains(&choice) => {
                    return Ok(Some(choice - 1))
                }
                _ => writeln!(out, "invalid selection: {line}")?,
            }
        }
    }
}
