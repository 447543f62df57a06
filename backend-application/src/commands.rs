pub mod detect_commands;
