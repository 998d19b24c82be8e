/// Host notifications a layout session listens to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HostHook {
    /// The host's undo stack restored earlier state.
    UndoRedo,
    /// The host is drawing a 3D scene frame (scale handle interaction).
    SceneFrame,
}

/// Subscription surface of the host application.
pub trait HostEvents {
    /// Start delivering `hook` to the session.
    fn subscribe(&mut self, hook: HostHook);
    /// Stop delivering `hook` to the session.
    fn unsubscribe(&mut self, hook: HostHook);
}

/// Scoped set of host subscriptions; every hook it subscribed is released on drop.
pub struct HookRegistration<'h, H: HostEvents + ?Sized> {
    host: &'h mut H,
    hooks: Vec<HostHook>,
}

impl<'h, H: HostEvents + ?Sized> HookRegistration<'h, H> {
    /// Subscribe each distinct hook once.
    ///
    /// Every hook is unsubscribed before it is subscribed, so re-registering after an unclean
    /// teardown never doubles delivery.
    pub fn register(host: &'h mut H, hooks: &[HostHook]) -> Self {
        let mut held = Vec::with_capacity(hooks.len());
        for &hook in hooks {
            if held.contains(&hook) {
                continue;
            }
            host.unsubscribe(hook);
            host.subscribe(hook);
            held.push(hook);
        }
        tracing::debug!(hooks = ?held, "host hooks registered");
        Self { host, hooks: held }
    }

    /// Hooks held by this registration.
    pub fn hooks(&self) -> &[HostHook] {
        &self.hooks
    }

    /// The host, for dispatch while the registration is alive.
    pub fn host(&mut self) -> &mut H {
        self.host
    }
}

impl<H: HostEvents + ?Sized> Drop for HookRegistration<'_, H> {
    fn drop(&mut self) {
        for hook in self.hooks.drain(..).rev() {
            self.host.unsubscribe(hook);
        }
        tracing::debug!("host hooks released");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/hooks.rs"]
mod tests;
