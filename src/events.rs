//! Normalized input events and decoding helpers for the raw hook payloads.

use ::deku::prelude::*;

use crate::{
    codes::{InputCode, KeyCode},
    motion::Direction,
};

/// A normalized system input notification, decoded from one low-level hook
/// callback. Transient: constructed per callback invocation and handed to the
/// channel sink, never retained.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RawInputEvent {
    KeyDown { code: InputCode, extended: bool },
    KeyUp { code: InputCode, extended: bool },
    ButtonDown { code: InputCode },
    ButtonUp { code: InputCode },
    Wheel { delta: i16 },
}

/// A qualifying cursor displacement, emitted by the motion sampler once the
/// accumulated movement crosses the configured threshold.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionEvent {
    /// Horizontal displacement in pixels; positive is screen-right.
    pub dx: i32,
    /// Vertical displacement in pixels; positive is screen-down.
    pub dy: i32,
    /// The angular sector the displacement falls into.
    pub direction: Direction,
    /// Euclidean length of the displacement in pixels.
    pub distance: f64,
}

/// Notifications delivered to overlay subscribers.
///
/// State changes are edge-triggered: one event per true press/release
/// transition, never one per OS notification.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CaptureEvent {
    StateChanged { code: InputCode, pressed: bool },
    Motion(MotionEvent),
}

/// Struct representation of the `KBDLLHOOKSTRUCT` flags byte.
///
/// Flag bitfield definition:
/// <https://learn.microsoft.com/en-us/windows/win32/api/winuser/ns-winuser-kbdllhookstruct>
///
/// Bit 5, the ALT context code, stays padded out: the system message
/// variants already carry that distinction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, DekuRead, DekuWrite)]
#[deku(endian = "big")]
pub(crate) struct LowLevelKeyFlags {
    /// Bit 7. The transition state: 1 if the key is being released.
    #[deku(bits = "1")]
    pub(crate) is_release: bool,

    /// Bit 4. Whether the event was injected by another process.
    #[deku(pad_bits_before = "2", bits = "1")]
    pub(crate) is_injected: bool,

    /// Bit 1. Whether the event was injected from a lower integrity level.
    #[deku(pad_bits_before = "2", bits = "1")]
    pub(crate) is_lower_il_injected: bool,

    /// Bit 0. Whether the key is an extended key, such as a right-hand ALT or
    /// CTRL on an enhanced keyboard.
    #[deku(bits = "1")]
    pub(crate) is_extended: bool,
}

impl LowLevelKeyFlags {
    /// Whether the event was synthesized by software rather than hardware,
    /// at any integrity level.
    pub(crate) fn injected(self) -> bool {
        self.is_injected || self.is_lower_il_injected
    }
}

impl From<u8> for LowLevelKeyFlags {
    fn from(flags: u8) -> Self {
        Self::from_bytes((&[flags], 0)).unwrap().1
    }
}

/// Extracts the signed wheel rotation from the high-order 16 bits of the
/// mouse payload data field. One detent is ±120.
pub(crate) const fn wheel_delta(mouse_data: u32) -> i16 {
    (mouse_data >> 16) as u16 as i16
}

/// Disambiguates the two auxiliary mouse buttons via the high word of the
/// mouse payload data field: 1 names the first X button, 2 the second. Other
/// values are malformed and yield no code.
pub(crate) fn aux_button(mouse_data: u32) -> Option<InputCode> {
    match (mouse_data >> 16) as u16 {
        1 => Some(KeyCode::XButton1.code()),
        2 => Some(KeyCode::XButton2.code()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ::pretty_assertions::assert_eq;

    /// Release of an extended key: bits 7 and 0 set.
    #[test]
    fn test_key_flags_release_extended() {
        assert_eq!(
            LowLevelKeyFlags::from(0x81),
            LowLevelKeyFlags {
                is_release: true,
                is_injected: false,
                is_lower_il_injected: false,
                is_extended: true,
            }
        );
    }

    /// The ALT context bit is padding; an alt-held press as delivered for
    /// WM_SYSKEYDOWN lights nothing here.
    #[test]
    fn test_key_flags_alt_bit_is_padding() {
        assert_eq!(
            LowLevelKeyFlags::from(0x20),
            LowLevelKeyFlags {
                is_release: false,
                is_injected: false,
                is_lower_il_injected: false,
                is_extended: false,
            }
        );
    }

    /// Either injection bit marks the event as software-synthesized.
    #[test]
    fn test_key_flags_injected() {
        let flags = LowLevelKeyFlags::from(0x10);
        assert!(flags.is_injected);
        assert!(!flags.is_release);
        assert!(flags.injected());

        let flags = LowLevelKeyFlags::from(0x02);
        assert!(flags.is_lower_il_injected);
        assert!(flags.injected());

        assert!(!LowLevelKeyFlags::from(0x00).injected());
    }

    #[test]
    fn test_wheel_delta_sign() {
        // One detent away from the user is +120 in the high word.
        assert_eq!(wheel_delta(120 << 16), 120);
        // Toward the user is -120, stored as two's complement.
        assert_eq!(wheel_delta((-120i16 as u16 as u32) << 16), -120);
        assert_eq!(wheel_delta(0), 0);
    }

    #[test]
    fn test_aux_button_sub_field() {
        assert_eq!(aux_button(1 << 16), Some(KeyCode::XButton1.code()));
        assert_eq!(aux_button(2 << 16), Some(KeyCode::XButton2.code()));
        assert_eq!(aux_button(3 << 16), None);
        assert_eq!(aux_button(0), None);
    }
}
