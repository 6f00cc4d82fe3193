//! Adapter for the low-level keyboard hook payload.

use ::lazy_static::lazy_static;
use ::tracing::trace;
use ::windows::Win32::{
    Foundation::{LPARAM, WPARAM},
    UI::WindowsAndMessaging::{
        HHOOK, KBDLLHOOKSTRUCT, WH_KEYBOARD_LL, WINDOWS_HOOK_ID, WM_KEYDOWN, WM_KEYUP,
        WM_SYSKEYDOWN, WM_SYSKEYUP,
    },
};

use super::{channel::HookClass, slot::Slot};
use crate::{
    codes::InputCode,
    events::{LowLevelKeyFlags, RawInputEvent},
};

lazy_static! {
    static ref SLOT: Slot<HHOOK> = Slot::new();
}

/// The system-wide low-level keyboard hook. Emits key down and key up
/// events; everything else about the keystroke (text, layout, IME) is not
/// this crate's concern.
pub(crate) struct KeyboardHook;

impl HookClass for KeyboardHook {
    const HOOK_ID: WINDOWS_HOOK_ID = WH_KEYBOARD_LL;
    const NAME: &'static str = "keyboard";

    fn slot() -> &'static Slot<HHOOK> {
        &SLOT
    }

    fn decode(wparam: WPARAM, lparam: LPARAM) -> Option<RawInputEvent> {
        // For WH_KEYBOARD_LL with a non-negative action code, lparam always
        // points at a KBDLLHOOKSTRUCT.
        let payload = unsafe { &*(lparam.0 as *const KBDLLHOOKSTRUCT) };
        key_event(
            wparam.0 as u32,
            payload.vkCode,
            (payload.flags.0 & 0xFF) as u8,
        )
    }
}

/// Classifies a keyboard hook message into a normalized event.
///
/// The "system" variants fire while Alt is held and are treated identically
/// to the ordinary key events. The message pair and the decoded transition
/// bit always agree for low-level hooks; the bit drives the press/release
/// split.
fn key_event(msg: u32, vk: u32, flags: u8) -> Option<RawInputEvent> {
    let code = InputCode::new(vk as u16);
    let flags = LowLevelKeyFlags::from(flags);

    match msg {
        WM_KEYDOWN | WM_SYSKEYDOWN | WM_KEYUP | WM_SYSKEYUP => {
            if flags.injected() {
                trace!(vk, "Software-injected key event");
            }
            Some(if flags.is_release {
                RawInputEvent::KeyUp {
                    code,
                    extended: flags.is_extended,
                }
            } else {
                RawInputEvent::KeyDown {
                    code,
                    extended: flags.is_extended,
                }
            })
        }
        _ => {
            trace!(msg, "Discarding unrecognized keyboard hook message");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::KeyCode;

    use ::pretty_assertions::assert_eq;

    #[test]
    fn test_key_down() {
        assert_eq!(
            key_event(WM_KEYDOWN, 0x41, 0x00),
            Some(RawInputEvent::KeyDown {
                code: KeyCode::A.code(),
                extended: false,
            })
        );
    }

    #[test]
    fn test_key_up_extended() {
        // Right-hand Ctrl reports the extended flag alongside the release
        // transition bit.
        assert_eq!(
            key_event(WM_KEYUP, 0xA3, 0x81),
            Some(RawInputEvent::KeyUp {
                code: KeyCode::RightControl.code(),
                extended: true,
            })
        );
    }

    /// Alt-held combinations arrive as the system variants and must behave
    /// like ordinary key events.
    #[test]
    fn test_system_key_variants() {
        assert_eq!(
            key_event(WM_SYSKEYDOWN, 0x48, 0x20),
            Some(RawInputEvent::KeyDown {
                code: KeyCode::H.code(),
                extended: false,
            })
        );
        assert_eq!(
            key_event(WM_SYSKEYUP, 0x48, 0xA0),
            Some(RawInputEvent::KeyUp {
                code: KeyCode::H.code(),
                extended: false,
            })
        );
    }

    /// Software-injected events are classified like hardware ones; the
    /// injection bits never change the press/release outcome.
    #[test]
    fn test_injected_event_still_classifies() {
        assert_eq!(
            key_event(WM_KEYDOWN, 0x41, 0x10),
            Some(RawInputEvent::KeyDown {
                code: KeyCode::A.code(),
                extended: false,
            })
        );
        assert_eq!(
            key_event(WM_KEYUP, 0x41, 0x82),
            Some(RawInputEvent::KeyUp {
                code: KeyCode::A.code(),
                extended: false,
            })
        );
    }

    #[test]
    fn test_unrecognized_message_is_discarded() {
        assert_eq!(key_event(0x0000, 0x41, 0x00), None);
    }
}
