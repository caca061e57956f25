use std::io::{self, Write};

/// Writes help text exactly as given. A closed stdout (`plantonista ... | head`)
/// is not an error.
pub fn write_stdout_text(text: &str) -> io::Result<()> {
    write_tolerating_closed_pipe(&mut io::stdout().lock(), text, false)
}

pub fn write_stdout_line(text: &str) -> io::Result<()> {
    write_tolerating_closed_pipe(&mut io::stdout().lock(), text, true)
}

fn write_tolerating_closed_pipe<W>(writer: &mut W, text: &str, newline: bool) -> io::Result<()>
where
    W: Write,
{
    match write_and_flush(writer, text, newline) {
        Err(error) if error.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

fn write_and_flush<W>(writer: &mut W, text: &str, newline: bool) -> io::Result<()>
where
    W: Write,
{
    writer.write_all(text.as_bytes())?;
    if newline {
        writer.write_all(b"\n")?;
    }
    writer.flush()
}
