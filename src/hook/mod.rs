//! System-wide low-level input hooks.

#[cfg(windows)]
mod channel;
#[cfg(windows)]
mod keyboard;
#[cfg(windows)]
mod mouse;
mod slot;

#[cfg(windows)]
pub(crate) use channel::HookChannel;
#[cfg(windows)]
pub(crate) use keyboard::KeyboardHook;
#[cfg(windows)]
pub(crate) use mouse::MouseHook;
pub(crate) use slot::Sink;
