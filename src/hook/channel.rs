//! Ownership and lifecycle of one system-wide low-level hook registration.

use ::std::{
    marker::PhantomData,
    panic::{catch_unwind, AssertUnwindSafe},
};
use ::tracing::{debug, error, warn};
use ::windows::Win32::{
    Foundation::{LPARAM, LRESULT, WPARAM},
    System::LibraryLoader::GetModuleHandleW,
    UI::WindowsAndMessaging::{
        CallNextHookEx, SetWindowsHookExW, UnhookWindowsHookEx, HHOOK, WINDOWS_HOOK_ID,
    },
};

use super::slot::{ClaimOutcome, OwnerId, Sink, Slot};
use crate::{errors::Context, events::RawInputEvent};

/// One class of system-wide low-level hook: the hook id to register, and how
/// to decode its callback payload.
pub(crate) trait HookClass: 'static {
    const HOOK_ID: WINDOWS_HOOK_ID;
    const NAME: &'static str;

    /// The process-wide registration slot for this class.
    fn slot() -> &'static Slot<HHOOK>;

    /// Decodes the opaque callback payload into a normalized event.
    ///
    /// Only called with a non-negative action code, for which the OS
    /// guarantees `lparam` points at the fixed payload layout of this hook
    /// class. Unrecognized messages yield `None` and are forwarded
    /// untouched.
    fn decode(wparam: WPARAM, lparam: LPARAM) -> Option<RawInputEvent>;
}

/// Owns the OS-level hook registration for one hook class.
///
/// The registration slot is process-global, but each channel instance
/// carries its own [`OwnerId`]: only the channel that made a registration
/// can release it or report it active, so a second capture instance can
/// neither hijack nor tear down the first one's hooks. `start` and `stop`
/// are idempotent, registration failure is reported rather than raised, and
/// dropping the channel releases its own registration so a leaked
/// system-wide hook cannot outlive its owner (observable to the user as
/// every other application's input going laggy).
pub(crate) struct HookChannel<C>
where
    C: HookClass,
{
    owner: OwnerId,
    class: PhantomData<C>,
}

impl<C> HookChannel<C>
where
    C: HookClass,
{
    pub(crate) fn new() -> Self {
        Self {
            owner: OwnerId::next(),
            class: PhantomData,
        }
    }

    /// Installs the system-wide hook, forwarding decoded events to `sink`
    /// synchronously from the OS callback context.
    ///
    /// Returns `false` if this channel does not hold the registration
    /// afterwards, either because the OS call failed or because another
    /// channel of the same class already holds it (both logged, non-fatal:
    /// the subsystem continues with reduced capability). A second `start`
    /// on the owning channel is a no-op returning `true`.
    pub(crate) fn start(&self, sink: Sink) -> bool {
        let module = match unsafe { GetModuleHandleW(None) }.function("GetModuleHandleW") {
            Ok(module) => module,
            Err(err) => {
                warn!(channel = C::NAME, error = %err, "Hook registration failed");
                return false;
            }
        };

        let register = || {
            match unsafe { SetWindowsHookExW(C::HOOK_ID, Some(hook_thunk::<C>), module, 0) }
                .context("Failed to install system-wide input hook")
                .function("SetWindowsHookExW")
            {
                Ok(hook) => {
                    debug!(channel = C::NAME, "Installed low-level hook");
                    Some(hook)
                }
                Err(err) => {
                    warn!(channel = C::NAME, error = %err, "Hook registration failed");
                    None
                }
            }
        };

        match C::slot().claim(self.owner, sink, register) {
            ClaimOutcome::Owned => true,
            ClaimOutcome::Foreign => {
                warn!(
                    channel = C::NAME,
                    "Hook already registered by another capture instance"
                );
                false
            }
            ClaimOutcome::Failed => false,
        }
    }

    /// Releases this channel's hook registration if it holds one. Safe to
    /// call repeatedly, when never started, or on a channel whose claim was
    /// refused: only the owning channel's registration is removed. A
    /// callback already in flight is allowed to complete; no further
    /// callbacks are dispatched once this returns.
    pub(crate) fn stop(&self) {
        C::slot().release(self.owner, |hook| {
            debug!(channel = C::NAME, "Removing low-level hook");
            if let Err(err) = unsafe { UnhookWindowsHookEx(hook) }
                .ok()
                .function("UnhookWindowsHookEx")
            {
                warn!(channel = C::NAME, error = %err, "Failed to remove hook");
            }
        });
    }

    /// Whether this channel currently holds the OS registration.
    pub(crate) fn is_active(&self) -> bool {
        C::slot().owned_by(self.owner)
    }
}

impl<C> Drop for HookChannel<C>
where
    C: HookClass,
{
    fn drop(&mut self) {
        self.stop();
    }
}

/// C-function hook procedure registered with the OS for hook class `C`.
///
/// The hook-chain contract is strict: every invocation must pass the
/// original, unmodified parameters to the next hook and return its result,
/// and must do so promptly — the OS silently stops delivering events to
/// slow or misbehaving hooks. Negative action codes are forwarded without
/// decoding, and a panic anywhere in decode/notify is caught here because
/// unwinding across the OS callback boundary is undefined behavior.
extern "system" fn hook_thunk<C>(code: i32, wparam: WPARAM, lparam: LPARAM) -> LRESULT
where
    C: HookClass,
{
    if code >= 0 {
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            if let Some(event) = C::decode(wparam, lparam) {
                if let Some(sink) = C::slot().sink() {
                    sink(event);
                }
            }
        }));
        if outcome.is_err() {
            error!(channel = C::NAME, "Panic swallowed in hook callback");
        }
    }

    unsafe { CallNextHookEx(HHOOK::default(), code, wparam, lparam) }
}
