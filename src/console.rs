use colored::Colorize;

/// Output port for everything the tool prints. Handlers and the
/// presenter write through this instead of the console directly so
/// tests can capture output.
pub trait Console: Send + Sync {
    fn info(&self, line: &str);
    fn error(&self, line: &str);
}

/// Terminal console: info lines to stdout, error lines to stderr.
pub struct Term;

impl Console for Term {
    fn info(&self, line: &str) {
        println!("{}", line);
    }

    fn error(&self, line: &str) {
        eprintln!("{} {}", "error:".red().bold(), line);
    }
}

#[cfg(test)]
pub use recording::Recording;
