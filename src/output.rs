#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {{
        use colored::Colorize;
        use std::io::Write;
        let _ = writeln!(std::io::stderr(), "{}", format!($($arg)*).red());
    }};
}

#[macro_export]
macro_rules! warning {
    ($($arg:tt)*) => {{
        use colored::Colorize;
        use std::io::Write;
        let _ = writeln!(std::io::stderr(), "{}", format!($($arg)*).yellow());
    }};
}

#[macro_export]
macro_rules! status {
    ($($arg:tt)*) => {{
        use colored::Colorize;
        use std::io::Write;
        let _ = writeln!(std::io::stdout(), "{}", format!($($arg)*).green());
    }};
}

#[macro_export]
macro_rules! info {
    () => {{
        use std::io::Write;
        let _ = writeln!(std::io::stdout());
    }};
    ($($arg:tt)*) => {{
        use std::io::Write;
        let _ = writeln!(std::io::stdout(), "{}", format!($($arg)*));
    }};
}
