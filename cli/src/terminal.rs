use std::io::{self, BufRead, Write};

use album_core::{Album, Notifier};

/// Notices go to stderr so stdout stays clean for the note path.
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notice(&self, message: &str) {
        eprintln!("{}", message);
    }
}

pub fn print_suggestions(albums: &[Album], out: &mut impl Write) -> io::Result<()> {
    for (index, album) in albums.iter().enumerate() {
        writeln!(out, "{:>2}. {}", index + 1, album.summary())?;
        if let Some(thumbnail) = album.thumbnail_url() {
            writeln!(out, "    {}", thumbnail)?;
        }
    }
    Ok(())
}

/// Reads a 1-based selection. Blank input or EOF means no selection.
pub fn read_choice(count: usize, input: &mut impl BufRead, out: &mut impl Write) -> io::Result<Option<usize>> {
    loop {
        write!(out, "Select an album [1-{}], blank to cancel: ", count)?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        match line.parse::<usize>() {
            Ok(n) if (1..=count).contains(&n) => return Ok(Some(n - 1)),
            _ => writeln!(out, "not a valid choice: {}", line)?,
        }
    }
}
