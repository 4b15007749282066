use std::io::IsTerminal;

/// Check if stderr is connected to a TTY
pub fn is_stderr_tty() -> bool {
    std::io::stderr().is_terminal()
}

/// Decide whether diagnostics on stderr get ANSI colors
pub fn should_use_colors_on_stderr() -> bool {
    colors_allowed(
        is_stderr_tty(),
        std::env::var_os("NO_COLOR").is_some(),
        std::env::var_os("FORCE_COLOR").is_some(),
    )
}

fn colors_allowed(is_tty: bool, no_color: bool, force_color: bool) -> bool {
    // Respect NO_COLOR (https://no-color.org/) above everything else
    if no_color {
        return false;
    }
    if force_color {
        return true;
    }
    is_tty
}
