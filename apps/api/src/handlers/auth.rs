use axum::Json;
use axum::extract::Extension;
use loadline_core::UserIdentity;
use loadline_domain::Principal;

use crate::dto::PrincipalResponse;

pub async fn me_handler(
    Extension(identity): Extension<UserIdentity>,
    Extension(principal): Extension<Principal>,
) -> Json<PrincipalResponse> {
    Json(PrincipalResponse::new(&principal, identity.email()))
}
