//! Adapter for the low-level mouse hook payload.

use ::lazy_static::lazy_static;
use ::tracing::trace;
use ::windows::Win32::{
    Foundation::{LPARAM, WPARAM},
    UI::WindowsAndMessaging::{
        HHOOK, MSLLHOOKSTRUCT, WH_MOUSE_LL, WINDOWS_HOOK_ID, WM_LBUTTONDOWN, WM_LBUTTONUP,
        WM_MBUTTONDOWN, WM_MBUTTONUP, WM_MOUSEMOVE, WM_MOUSEWHEEL, WM_RBUTTONDOWN, WM_RBUTTONUP,
        WM_XBUTTONDOWN, WM_XBUTTONUP,
    },
};

use super::{channel::HookClass, slot::Slot};
use crate::{
    codes::KeyCode,
    events::{aux_button, wheel_delta, RawInputEvent},
};

lazy_static! {
    static ref SLOT: Slot<HHOOK> = Slot::new();
}

/// The system-wide low-level mouse hook. Emits button down/up events for all
/// five button classes plus wheel rotation. Cursor movement is deliberately
/// not forwarded: position is polled by the motion sampler instead, which
/// keeps this callback cheap under high-rate mice.
pub(crate) struct MouseHook;

impl HookClass for MouseHook {
    const HOOK_ID: WINDOWS_HOOK_ID = WH_MOUSE_LL;
    const NAME: &'static str = "mouse";

    fn slot() -> &'static Slot<HHOOK> {
        &SLOT
    }

    fn decode(wparam: WPARAM, lparam: LPARAM) -> Option<RawInputEvent> {
        // For WH_MOUSE_LL with a non-negative action code, lparam always
        // points at an MSLLHOOKSTRUCT.
        let payload = unsafe { &*(lparam.0 as *const MSLLHOOKSTRUCT) };
        button_event(wparam.0 as u32, payload.mouseData)
    }
}

/// Classifies a mouse hook message into a normalized event. The two
/// auxiliary buttons share a message pair and are disambiguated by the high
/// word of the payload data field.
fn button_event(msg: u32, mouse_data: u32) -> Option<RawInputEvent> {
    match msg {
        WM_LBUTTONDOWN => Some(RawInputEvent::ButtonDown {
            code: KeyCode::LeftButton.code(),
        }),
        WM_LBUTTONUP => Some(RawInputEvent::ButtonUp {
            code: KeyCode::LeftButton.code(),
        }),
        WM_RBUTTONDOWN => Some(RawInputEvent::ButtonDown {
            code: KeyCode::RightButton.code(),
        }),
        WM_RBUTTONUP => Some(RawInputEvent::ButtonUp {
            code: KeyCode::RightButton.code(),
        }),
        WM_MBUTTONDOWN => Some(RawInputEvent::ButtonDown {
            code: KeyCode::MiddleButton.code(),
        }),
        WM_MBUTTONUP => Some(RawInputEvent::ButtonUp {
            code: KeyCode::MiddleButton.code(),
        }),
        WM_XBUTTONDOWN => aux_button(mouse_data).map(|code| RawInputEvent::ButtonDown { code }),
        WM_XBUTTONUP => aux_button(mouse_data).map(|code| RawInputEvent::ButtonUp { code }),
        WM_MOUSEWHEEL => Some(RawInputEvent::Wheel {
            delta: wheel_delta(mouse_data),
        }),
        WM_MOUSEMOVE => None,
        _ => {
            trace!(msg, "Discarding unrecognized mouse hook message");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ::pretty_assertions::assert_eq;

    #[test]
    fn test_primary_buttons() {
        assert_eq!(
            button_event(WM_LBUTTONDOWN, 0),
            Some(RawInputEvent::ButtonDown {
                code: KeyCode::LeftButton.code(),
            })
        );
        assert_eq!(
            button_event(WM_RBUTTONUP, 0),
            Some(RawInputEvent::ButtonUp {
                code: KeyCode::RightButton.code(),
            })
        );
        assert_eq!(
            button_event(WM_MBUTTONDOWN, 0),
            Some(RawInputEvent::ButtonDown {
                code: KeyCode::MiddleButton.code(),
            })
        );
    }

    /// The X-button message pair carries which button in the payload high
    /// word: 1 is the first auxiliary, 2 the second.
    #[test]
    fn test_aux_buttons_disambiguated() {
        assert_eq!(
            button_event(WM_XBUTTONDOWN, 1 << 16),
            Some(RawInputEvent::ButtonDown {
                code: KeyCode::XButton1.code(),
            })
        );
        assert_eq!(
            button_event(WM_XBUTTONUP, 2 << 16),
            Some(RawInputEvent::ButtonUp {
                code: KeyCode::XButton2.code(),
            })
        );
        // A malformed sub-field is discarded, not misattributed.
        assert_eq!(button_event(WM_XBUTTONDOWN, 7 << 16), None);
    }

    #[test]
    fn test_wheel_rotation() {
        assert_eq!(
            button_event(WM_MOUSEWHEEL, 120 << 16),
            Some(RawInputEvent::Wheel { delta: 120 })
        );
        assert_eq!(
            button_event(WM_MOUSEWHEEL, (-120i16 as u16 as u32) << 16),
            Some(RawInputEvent::Wheel { delta: -120 })
        );
    }

    #[test]
    fn test_mouse_move_not_forwarded() {
        assert_eq!(button_event(WM_MOUSEMOVE, 0), None);
    }
}
