use super::Workbench;
use crate::kernel::Action as KernelAction;

impl Workbench {
    pub(super) fn dispatch_kernel(&mut self, action: KernelAction) -> bool {
        let result = self.store.dispatch(action);
        for effect in result.effects {
            tracing::trace!(?effect, "running effect");
            self.runtime.run_effect(effect);
        }
        result.state_changed
    }
}
