use chrono::Local;

pub trait Logger: Send + Sync {
    fn log(&mut self, message: &str);
    fn debug_log(&mut self, message: &str);
}

/// Console logger for the one-shot CLI. Progress lines go to stderr so the
/// final report on stdout stays pipeable.
#[derive(Debug)]
pub struct ConsoleLogger {
    debug: bool,
}

impl ConsoleLogger {
    pub fn new(debug: bool) -> Self {
        ConsoleLogger { debug }
    }

    fn write(&self, message: &str) {
        eprintln!("{}: {}", Local::now().format("%Y-%m-%d %H:%M:%S"), message);
    }
}

impl Logger for ConsoleLogger {
    fn log(&mut self, message: &str) {
        self.write(message);
    }

    fn debug_log(&mut self, message: &str) {
        if self.debug {
            self.write(&format!("[DEBUG] {}", message));
        }
    }
}

#[cfg(test)]
pub struct MockLogger {
    pub logs: Vec<String>,
}

#[cfg(test)]
impl MockLogger {
    pub fn new() -> Self {
        Self { logs: Vec::new() }
    }
}

#[cfg(test)]
impl Logger for MockLogger {
    fn log(&mut self, message: &str) {
        self.logs.push(message.to_string());
    }

    fn debug_log(&mut self, message: &str) {
        self.logs.push(format!("DEBUG: {}", message));
    }
}
