//! Static mapping of platform virtual-key and mouse-button identifiers to
//! symbolic names.
//!
//! The table is pure data: codes are stable for the process lifetime and the
//! compiler rejects duplicate discriminants. Mouse buttons use the native
//! virtual-key values (`0x01`–`0x06`) so keys and buttons share one code
//! space, and a single reserved sentinel marks inputs that cannot be observed
//! through the hook chain at all (the hardware Fn layer).

use ::std::fmt::{self, Display};
use ::strum::{EnumIter, FromRepr};

/// Integer identifier for a key or mouse button in the platform virtual-key
/// space.
///
/// Raw codes arrive from the low-level hooks and may name keys that have no
/// entry in [`KeyCode`]; such codes are still tracked by the state store and
/// simply have no display symbol. The one exception is
/// [`InputCode::NOT_OBSERVABLE`], which queries always report as not pressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InputCode(u16);

impl InputCode {
    /// Reserved sentinel for inputs the hook chain never reports, such as the
    /// hardware Fn layer key. Never stored; always reads as not pressed.
    pub const NOT_OBSERVABLE: Self = Self(0xFF);

    /// Wraps a raw platform virtual-key value.
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    /// The raw platform virtual-key value.
    pub const fn value(self) -> u16 {
        self.0
    }

    /// Whether presses of this code can ever be observed. False only for the
    /// reserved sentinel.
    pub const fn is_observable(self) -> bool {
        self.0 != Self::NOT_OBSERVABLE.0
    }

    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<KeyCode> for InputCode {
    fn from(key: KeyCode) -> Self {
        Self(key as u16)
    }
}

impl Display for InputCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match KeyCode::from_code(*self) {
            Some(key) => f.write_str(key.symbol()),
            None => write!(f, "0x{:02X}", self.0),
        }
    }
}

macro_rules! virtual_key_table {
    ($($name:ident = $code:literal => $symbol:literal,)*) => {
        /// Symbolic names for the virtual keys and mouse buttons the overlay
        /// can label.
        ///
        /// Discriminants are the Win32 virtual-key values. The generic
        /// modifier codes (`Shift`, `Control`, `Alt`) and their left/right
        /// variants are distinct codes; the low-level hooks always report
        /// the specific variant.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, FromRepr)]
        #[repr(u16)]
        pub enum KeyCode {
            $($name = $code,)*
        }

        impl KeyCode {
            /// The display symbol used by overlay layouts.
            pub const fn symbol(self) -> &'static str {
                match self {
                    $(Self::$name => $symbol,)*
                }
            }
        }
    };
}

virtual_key_table! {
    // Mouse buttons share the virtual-key space.
    LeftButton = 0x01 => "LMB",
    RightButton = 0x02 => "RMB",
    MiddleButton = 0x04 => "MMB",
    XButton1 = 0x05 => "M4",
    XButton2 = 0x06 => "M5",

    Backspace = 0x08 => "Bksp",
    Tab = 0x09 => "Tab",
    Enter = 0x0D => "Enter",
    Shift = 0x10 => "Shift",
    Control = 0x11 => "Ctrl",
    Alt = 0x12 => "Alt",
    Pause = 0x13 => "Pause",
    CapsLock = 0x14 => "Caps",
    Escape = 0x1B => "Esc",
    Space = 0x20 => "Space",
    PageUp = 0x21 => "PgUp",
    PageDown = 0x22 => "PgDn",
    End = 0x23 => "End",
    Home = 0x24 => "Home",
    Left = 0x25 => "←",
    Up = 0x26 => "↑",
    Right = 0x27 => "→",
    Down = 0x28 => "↓",
    PrintScreen = 0x2C => "PrtSc",
    Insert = 0x2D => "Ins",
    Delete = 0x2E => "Del",

    Key0 = 0x30 => "0",
    Key1 = 0x31 => "1",
    Key2 = 0x32 => "2",
    Key3 = 0x33 => "3",
    Key4 = 0x34 => "4",
    Key5 = 0x35 => "5",
    Key6 = 0x36 => "6",
    Key7 = 0x37 => "7",
    Key8 = 0x38 => "8",
    Key9 = 0x39 => "9",

    A = 0x41 => "A",
    B = 0x42 => "B",
    C = 0x43 => "C",
    D = 0x44 => "D",
    E = 0x45 => "E",
    F = 0x46 => "F",
    G = 0x47 => "G",
    H = 0x48 => "H",
    I = 0x49 => "I",
    J = 0x4A => "J",
    K = 0x4B => "K",
    L = 0x4C => "L",
    M = 0x4D => "M",
    N = 0x4E => "N",
    O = 0x4F => "O",
    P = 0x50 => "P",
    Q = 0x51 => "Q",
    R = 0x52 => "R",
    S = 0x53 => "S",
    T = 0x54 => "T",
    U = 0x55 => "U",
    V = 0x56 => "V",
    W = 0x57 => "W",
    X = 0x58 => "X",
    Y = 0x59 => "Y",
    Z = 0x5A => "Z",

    LeftWin = 0x5B => "Win",
    RightWin = 0x5C => "Win",
    Apps = 0x5D => "Menu",

    Numpad0 = 0x60 => "Num0",
    Numpad1 = 0x61 => "Num1",
    Numpad2 = 0x62 => "Num2",
    Numpad3 = 0x63 => "Num3",
    Numpad4 = 0x64 => "Num4",
    Numpad5 = 0x65 => "Num5",
    Numpad6 = 0x66 => "Num6",
    Numpad7 = 0x67 => "Num7",
    Numpad8 = 0x68 => "Num8",
    Numpad9 = 0x69 => "Num9",
    Multiply = 0x6A => "Num*",
    Add = 0x6B => "Num+",
    Subtract = 0x6D => "Num-",
    Decimal = 0x6E => "Num.",
    Divide = 0x6F => "Num/",

    F1 = 0x70 => "F1",
    F2 = 0x71 => "F2",
    F3 = 0x72 => "F3",
    F4 = 0x73 => "F4",
    F5 = 0x74 => "F5",
    F6 = 0x75 => "F6",
    F7 = 0x76 => "F7",
    F8 = 0x77 => "F8",
    F9 = 0x78 => "F9",
    F10 = 0x79 => "F10",
    F11 = 0x7A => "F11",
    F12 = 0x7B => "F12",

    NumLock = 0x90 => "NumLk",
    ScrollLock = 0x91 => "ScrLk",
    LeftShift = 0xA0 => "LShift",
    RightShift = 0xA1 => "RShift",
    LeftControl = 0xA2 => "LCtrl",
    RightControl = 0xA3 => "RCtrl",
    LeftAlt = 0xA4 => "LAlt",
    RightAlt = 0xA5 => "RAlt",

    VolumeMute = 0xAD => "Mute",
    VolumeDown = 0xAE => "Vol-",
    VolumeUp = 0xAF => "Vol+",
    MediaNext = 0xB0 => "Next",
    MediaPrev = 0xB1 => "Prev",
    MediaStop = 0xB2 => "Stop",
    MediaPlayPause = 0xB3 => "Play",

    Semicolon = 0xBA => ";",
    Plus = 0xBB => "=",
    Comma = 0xBC => ",",
    Minus = 0xBD => "-",
    Period = 0xBE => ".",
    Slash = 0xBF => "/",
    Grave = 0xC0 => "`",
    LeftBracket = 0xDB => "[",
    Backslash = 0xDC => "\\",
    RightBracket = 0xDD => "]",
    Quote = 0xDE => "'",

    // Hardware Fn layer. Reported by nothing, reserved so layouts can still
    // place the key; see [`InputCode::NOT_OBSERVABLE`].
    Function = 0xFF => "Fn",
}

impl KeyCode {
    /// The [`InputCode`] for this key.
    pub const fn code(self) -> InputCode {
        InputCode(self as u16)
    }

    /// Looks up the symbolic key for a raw code, if the table names it.
    pub fn from_code(code: InputCode) -> Option<Self> {
        Self::from_repr(code.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ::pretty_assertions::assert_eq;
    use ::strum::IntoEnumIterator;

    #[test]
    fn test_code_round_trip() {
        for key in KeyCode::iter() {
            assert_eq!(KeyCode::from_code(key.code()), Some(key));
        }
    }

    #[test]
    fn test_unknown_code_has_no_symbol() {
        assert_eq!(KeyCode::from_code(InputCode::new(0x07)), None);
        assert_eq!(InputCode::new(0x07).to_string(), "0x07");
    }

    #[test]
    fn test_sentinel_is_not_observable() {
        assert!(!InputCode::NOT_OBSERVABLE.is_observable());
        assert!(!KeyCode::Function.code().is_observable());
        assert!(KeyCode::A.code().is_observable());
    }

    #[test]
    fn test_mouse_buttons_use_native_codes() {
        assert_eq!(KeyCode::LeftButton.code(), InputCode::new(0x01));
        assert_eq!(KeyCode::XButton2.code(), InputCode::new(0x06));
    }

    #[test]
    fn test_display_uses_table_symbol() {
        assert_eq!(KeyCode::Escape.code().to_string(), "Esc");
        assert_eq!(InputCode::new(0x41).to_string(), "A");
    }
}
