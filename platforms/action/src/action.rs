use keymap::KeyMap;

/// Key bindings of the interactive simulator. Plain characters are not bound
/// so they can be typed into the input field.
#[derive(KeyMap, Clone, Copy, Debug, PartialEq)]
pub enum Action {
    /// Quit the application
    #[key("esc", "ctrl-c")]
    Quit,
    /// Validate the input and run the machine to halt
    #[key("enter")]
    Process,
    /// Delete the last input character
    #[key("backspace")]
    DeleteChar,
    /// Clear the input field
    #[key("ctrl-u")]
    ClearInput,
    /// Advance the machine by one step
    #[key("ctrl-s")]
    Step,
    /// Reset the machine to its initial tape
    #[key("ctrl-r")]
    Reset,
    /// Toggle auto-play
    #[key("ctrl-p")]
    ToggleAutoPlay,
    /// Toggle help display
    #[key("f1")]
    ToggleHelp,
}
