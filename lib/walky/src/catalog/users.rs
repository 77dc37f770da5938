//! Users, roles and permissions.

use serde::{Deserialize, Serialize};
use walky_core::{ContentType, FileValue, FormFields, RequestBody, Route};

use super::ReasonBody;
use crate::admin::ListQuery;
use crate::api_client::Call;
use crate::models::{GeoPoint, MessageEnvelope, Paginated, Role, SuccessEnvelope, User};
use crate::{HttpClient, Result, WalkyApi};

/// `GET /users/me`
pub const ME: Route = Route::get("usersMe", "/users/me").secure();
/// `PATCH /users/me`
pub const UPDATE_ME: Route = Route::patch("usersUpdateMe", "/users/me").secure();
/// `DELETE /users/me`
pub const DELETE_ME: Route = Route::delete("usersDeleteMe", "/users/me").secure();
/// `POST /users/me/avatar`
pub const UPLOAD_AVATAR: Route = Route::post("usersUploadAvatar", "/users/me/avatar")
    .secure()
    .content(ContentType::FormData);
/// `GET /users/{user_id}`
pub const DETAIL: Route = Route::get("usersDetail", "/users/{user_id}").secure();
/// `GET /users/search`
pub const SEARCH: Route = Route::get("usersSearch", "/users/search").secure();
/// `GET /admin/users`
pub const ADMIN_LIST: Route = Route::get("adminUsersList", "/admin/users").secure();
/// `GET /admin/users/{user_id}`
pub const ADMIN_DETAIL: Route = Route::get("adminUsersDetail", "/admin/users/{user_id}").secure();
/// `POST /admin/users/{user_id}/ban`
pub const ADMIN_BAN: Route = Route::post("adminUsersBan", "/admin/users/{user_id}/ban").secure();
/// `POST /admin/users/{user_id}/unban`
pub const ADMIN_UNBAN: Route = Route::post("adminUsersUnban", "/admin/users/{user_id}/unban").secure();
/// `DELETE /admin/users/{user_id}`
pub const ADMIN_DELETE: Route = Route::delete("adminUsersDelete", "/admin/users/{user_id}").secure();
/// `POST /admin/users/{user_id}/restore`
pub const ADMIN_RESTORE: Route =
    Route::post("adminUsersRestore", "/admin/users/{user_id}/restore").secure();
/// `PATCH /admin/users/{user_id}/role`
pub const ADMIN_SET_ROLE: Route =
    Route::patch("adminUsersSetRole", "/admin/users/{user_id}/role").secure();
/// `GET /admin/roles`
pub const ROLES_LIST: Route = Route::get("adminRolesList", "/admin/roles").secure();
/// `GET /admin/permissions`
pub const PERMISSIONS_LIST: Route = Route::get("adminPermissionsList", "/admin/permissions").secure();
/// `PUT /admin/roles/{role}/permissions`
pub const ROLE_PERMISSIONS_UPDATE: Route =
    Route::put("adminRolePermissionsUpdate", "/admin/roles/{role}/permissions").secure();

/// Every route declared in this module.
pub const ROUTES: &[Route] = &[
    ME,
    UPDATE_ME,
    DELETE_ME,
    UPLOAD_AVATAR,
    DETAIL,
    SEARCH,
    ADMIN_LIST,
    ADMIN_DETAIL,
    ADMIN_BAN,
    ADMIN_UNBAN,
    ADMIN_DELETE,
    ADMIN_RESTORE,
    ADMIN_SET_ROLE,
    ROLES_LIST,
    PERMISSIONS_LIST,
    ROLE_PERMISSIONS_UPDATE,
];

/// User lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserSearchQuery {
    /// Search text.
    pub q: String,
    /// Campus id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campus: Option<String>,
    /// Maximum number of rows returned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Profile fields to patch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfileUpdate {
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Public handle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Profile text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Interest ids.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interests: Option<Vec<String>>,
    /// Home position shown to peers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
}

/// Ban options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BanRequest {
    /// Reason recorded in the audit trail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// `None` bans permanently.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_days: Option<u32>,
}

/// Role change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SetRoleBody {
    /// Role granted.
    pub role: Role,
}

/// A role with the permissions granted to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleInfo {
    /// Role the permissions belong to.
    pub role: Role,
    /// Permission names.
    #[serde(default)]
    pub permissions: Vec<String>,
}

/// Replacement permission set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PermissionsBody {
    /// Permission names.
    pub permissions: Vec<String>,
}

impl<C: HttpClient> WalkyApi<C> {
    /// `GET /users/me`
    pub async fn users_me(&self) -> Result<User> {
        self.execute(Call::new(ME)).await
    }

    /// `PATCH /users/me`
    pub async fn users_update_me(&self, update: &ProfileUpdate) -> Result<MessageEnvelope<User>> {
        self.execute(Call::new(UPDATE_ME).json(update)?).await
    }

    /// `DELETE /users/me` (soft delete)
    pub async fn users_delete_me(&self, body: &ReasonBody) -> Result<MessageEnvelope> {
        self.execute(Call::new(DELETE_ME).json(body)?).await
    }

    /// `POST /users/me/avatar` (multipart)
    pub async fn users_upload_avatar(&self, avatar: FileValue) -> Result<MessageEnvelope<User>> {
        let form = FormFields::new().file("avatar", avatar);
        self.execute(Call::new(UPLOAD_AVATAR).body(RequestBody::Fields(form)))
            .await
    }

    /// `GET /users/{user_id}`
    pub async fn users_detail(&self, user_id: &str) -> Result<User> {
        self.execute(Call::new(DETAIL).path("user_id", user_id)).await
    }

    /// `GET /users/search`
    pub async fn users_search(&self, query: &UserSearchQuery) -> Result<Vec<User>> {
        self.execute(Call::new(SEARCH).query(query)?).await
    }

    /// `GET /admin/users`
    pub async fn admin_users_list(&self, query: &ListQuery) -> Result<Paginated<User>> {
        self.execute(Call::new(ADMIN_LIST).query_pairs(query.query_pairs()))
            .await
    }

    /// `GET /admin/users/{user_id}`
    pub async fn admin_users_detail(&self, user_id: &str) -> Result<SuccessEnvelope<User>> {
        self.execute(Call::new(ADMIN_DETAIL).path("user_id", user_id))
            .await
    }

    /// `POST /admin/users/{user_id}/ban`
    pub async fn admin_users_ban(
        &self,
        user_id: &str,
        request: &BanRequest,
    ) -> Result<MessageEnvelope<User>> {
        self.execute(Call::new(ADMIN_BAN).path("user_id", user_id).json(request)?)
            .await
    }

    /// `POST /admin/users/{user_id}/unban`
    pub async fn admin_users_unban(&self, user_id: &str) -> Result<MessageEnvelope<User>> {
        self.execute(Call::new(ADMIN_UNBAN).path("user_id", user_id))
            .await
    }

    /// `DELETE /admin/users/{user_id}` (soft delete)
    pub async fn admin_users_delete(
        &self,
        user_id: &str,
        body: &ReasonBody,
    ) -> Result<MessageEnvelope> {
        self.execute(Call::new(ADMIN_DELETE).path("user_id", user_id).json(body)?)
            .await
    }

    /// `POST /admin/users/{user_id}/restore`
    pub async fn admin_users_restore(&self, user_id: &str) -> Result<MessageEnvelope<User>> {
        self.execute(Call::new(ADMIN_RESTORE).path("user_id", user_id))
            .await
    }

    /// `PATCH /admin/users/{user_id}/role`
    pub async fn admin_users_set_role(
        &self,
        user_id: &str,
        role: Role,
    ) -> Result<MessageEnvelope<User>> {
        self.execute(
            Call::new(ADMIN_SET_ROLE)
                .path("user_id", user_id)
                .json(&SetRoleBody { role })?,
        )
        .await
    }

    /// `GET /admin/roles`
    pub async fn admin_roles_list(&self) -> Result<SuccessEnvelope<Vec<RoleInfo>>> {
        self.execute(Call::new(ROLES_LIST)).await
    }

    /// `GET /admin/permissions`
    pub async fn admin_permissions_list(&self) -> Result<SuccessEnvelope<Vec<String>>> {
        self.execute(Call::new(PERMISSIONS_LIST)).await
    }

    /// `PUT /admin/roles/{role}/permissions`
    pub async fn admin_role_permissions_update(
        &self,
        role: Role,
        permissions: Vec<String>,
    ) -> Result<MessageEnvelope<RoleInfo>> {
        self.execute(
            Call::new(ROLE_PERMISSIONS_UPDATE)
                .path("role", role.as_str())
                .json(&PermissionsBody { permissions })?,
        )
        .await
    }
}
