//! Create-user action

use tracing::debug;

use carrier_domain::repository::{IdentityStore, ProfileStore};
use carrier_domain::service::AccountProvisioner;

use super::view_state::{AdminAction, AdminFormState};

/// Submit the admin form and apply the result.
///
/// Returns the state unchanged when the form cannot be submitted.
pub fn submit_new_user<I, P>(
    state: AdminFormState,
    provisioner: &AccountProvisioner<I, P>,
) -> AdminFormState
where
    I: IdentityStore,
    P: ProfileStore,
{
    if !state.can_submit() {
        return state;
    }
    let state = state.reduce(AdminAction::Submit);
    debug!(username = %state.request.username, role = %state.request.role, "submitting new user");
    let result = provisioner.create_user(&state.request);
    state.reduce(AdminAction::Completed(result))
}
