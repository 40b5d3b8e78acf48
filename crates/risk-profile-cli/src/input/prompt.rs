use std::io::{self, BufRead, Write};

/// Line-oriented prompts over any reader/writer pair.
///
/// Pressing Enter on an empty line picks the first option.
pub struct Prompter<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Prompter { reader, writer }
    }

    pub fn writer(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Ask until a valid option is picked. Returns the zero-based index.
    pub fn choose<S: AsRef<str>>(&mut self, prompt: &str, options: &[S]) -> io::Result<usize> {
        if options.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "no options to choose from",
            ));
        }

        writeln!(self.writer)?;
        writeln!(self.writer, "{}", prompt)?;
        for (i, option) in options.iter().enumerate() {
            let marker = if i == 0 { "*" } else { " " };
            writeln!(self.writer, " {} {}. {}", marker, i + 1, option.as_ref())?;
        }

        loop {
            write!(self.writer, "Select 1-{} [1]: ", options.len())?;
            self.writer.flush()?;

            let line = self.read_line()?;
            if line.is_empty() {
                return Ok(0);
            }
            match line.parse::<usize>() {
                Ok(n) if (1..=options.len()).contains(&n) => return Ok(n - 1),
                _ => writeln!(
                    self.writer,
                    "Please enter a number between 1 and {}.",
                    options.len()
                )?,
            }
        }
    }

    /// Yes/no question; Enter takes `default`.
    pub fn confirm(&mut self, question: &str, default: bool) -> io::Result<bool> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        loop {
            write!(self.writer, "{} {} ", question, hint)?;
            self.writer.flush()?;

            match self.read_line()?.to_ascii_lowercase().as_str() {
                "" => return Ok(default),
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => writeln!(self.writer, "Please answer y or n.")?,
            }
        }
    }

    fn read_line(&mut self) -> io::Result<String> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed before an answer was given",
            ));
        }
        Ok(line.trim().to_string())
    }
}
