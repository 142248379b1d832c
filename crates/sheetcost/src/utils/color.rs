/// True when `NO_COLOR` is set to anything
pub fn should_disable_color() -> bool {
    std::env::var_os("NO_COLOR").is_some()
}

/// Turn off `colored` output when `NO_COLOR` is set
pub fn init_color() {
    if should_disable_color() {
        colored::control::set_override(false);
    }
}
