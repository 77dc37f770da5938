//! Spaces, space categories and space moderation.

use serde::Serialize;
use walky_core::{ContentType, FileValue, FormFields, RequestBody, Route};

use super::{PageQuery, ReasonBody};
use crate::admin::ListQuery;
use crate::api_client::Call;
use crate::models::{
    MessageEnvelope, Paginated, Space, SpaceCategory, SuccessEnvelope, User, Visibility,
};
use crate::{HttpClient, Result, WalkyApi};

/// `GET /api/spaces`
pub const LIST: Route = Route::get("spacesList", "/api/spaces").secure();
/// `GET /api/spaces/{space_id}`
pub const DETAIL: Route = Route::get("spacesDetail", "/api/spaces/{space_id}").secure();
/// `POST /api/spaces`
pub const CREATE: Route = Route::post("spacesCreate", "/api/spaces").secure();
/// `PATCH /api/spaces/{space_id}`
pub const UPDATE: Route = Route::patch("spacesUpdate", "/api/spaces/{space_id}").secure();
/// `DELETE /api/spaces/{space_id}`
pub const DELETE: Route = Route::delete("spacesDelete", "/api/spaces/{space_id}").secure();
/// `POST /api/spaces/{space_id}/join`
pub const JOIN: Route = Route::post("spacesJoin", "/api/spaces/{space_id}/join").secure();
/// `POST /api/spaces/{space_id}/leave`
pub const LEAVE: Route = Route::post("spacesLeave", "/api/spaces/{space_id}/leave").secure();
/// `GET /api/spaces/{space_id}/members`
pub const MEMBERS: Route = Route::get("spacesMembers", "/api/spaces/{space_id}/members").secure();
/// `POST /api/spaces/{space_id}/cover`
pub const UPLOAD_COVER: Route = Route::post("spacesUploadCover", "/api/spaces/{space_id}/cover")
    .secure()
    .content(ContentType::FormData);
/// `GET /api/space-categories`
pub const CATEGORIES_LIST: Route =
    Route::get("spaceCategoriesList", "/api/space-categories").secure();
/// `POST /api/space-categories`
pub const CATEGORIES_CREATE: Route = Route::post("spaceCategoriesCreate", "/api/space-categories")
    .secure()
    .content(ContentType::FormData);
/// `POST /api/space-categories/{category_id}/image`
pub const CATEGORIES_UPLOAD_IMAGE: Route = Route::post(
    "spaceCategoriesUploadImage",
    "/api/space-categories/{category_id}/image",
)
.secure()
.content(ContentType::FormData);
/// `DELETE /api/space-categories/{category_id}`
pub const CATEGORIES_DELETE: Route =
    Route::delete("spaceCategoriesDelete", "/api/space-categories/{category_id}").secure();
/// `GET /admin/spaces`
pub const ADMIN_LIST: Route = Route::get("adminSpacesList", "/admin/spaces").secure();
/// `POST /admin/spaces/{space_id}/flag`
pub const ADMIN_FLAG: Route = Route::post("adminSpacesFlag", "/admin/spaces/{space_id}/flag").secure();
/// `POST /admin/spaces/{space_id}/unflag`
pub const ADMIN_UNFLAG: Route =
    Route::post("adminSpacesUnflag", "/admin/spaces/{space_id}/unflag").secure();
/// `DELETE /admin/spaces/{space_id}`
pub const ADMIN_DELETE: Route =
    Route::delete("adminSpacesDelete", "/admin/spaces/{space_id}").secure();
/// `PATCH /admin/spaces/{space_id}/category`
pub const ADMIN_SET_CATEGORY: Route =
    Route::patch("adminSpacesSetCategory", "/admin/spaces/{space_id}/category").secure();

/// Every route declared in this module.
pub const ROUTES: &[Route] = &[
    LIST,
    DETAIL,
    CREATE,
    UPDATE,
    DELETE,
    JOIN,
    LEAVE,
    MEMBERS,
    UPLOAD_COVER,
    CATEGORIES_LIST,
    CATEGORIES_CREATE,
    CATEGORIES_UPLOAD_IMAGE,
    CATEGORIES_DELETE,
    ADMIN_LIST,
    ADMIN_FLAG,
    ADMIN_UNFLAG,
    ADMIN_DELETE,
    ADMIN_SET_CATEGORY,
];

/// Filters of the space list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SpaceListQuery {
    /// 1-based page number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Maximum number of rows returned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Free-text filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Campus id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campus: Option<String>,
    /// Category id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Fields of a space to create or patch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceInput {
    /// Display title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Campus id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campus: Option<String>,
    /// Category id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Who can see it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
}

/// Multipart fields of a new category; `metadata` is sent as a JSON string.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SpaceCategoryInput {
    /// Category label.
    pub name: String,
    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Sort position among siblings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
    /// Arbitrary extra attributes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

/// Moves a space to another category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetCategoryBody {
    /// Category id.
    pub category: String,
}

impl<C: HttpClient> WalkyApi<C> {
    /// `GET /api/spaces`
    pub async fn spaces_list(&self, query: &SpaceListQuery) -> Result<Paginated<Space>> {
        self.execute(Call::new(LIST).query(query)?).await
    }

    /// `GET /api/spaces/{space_id}`
    pub async fn spaces_detail(&self, space_id: &str) -> Result<Space> {
        self.execute(Call::new(DETAIL).path("space_id", space_id)).await
    }

    /// `POST /api/spaces`; a duplicate title on the same campus answers 409.
    pub async fn spaces_create(&self, input: &SpaceInput) -> Result<MessageEnvelope<Space>> {
        self.execute(Call::new(CREATE).json(input)?).await
    }

    /// `PATCH /api/spaces/{space_id}`
    pub async fn spaces_update(
        &self,
        space_id: &str,
        input: &SpaceInput,
    ) -> Result<MessageEnvelope<Space>> {
        self.execute(Call::new(UPDATE).path("space_id", space_id).json(input)?)
            .await
    }

    /// `DELETE /api/spaces/{space_id}`
    pub async fn spaces_delete(&self, space_id: &str) -> Result<MessageEnvelope> {
        self.execute(Call::new(DELETE).path("space_id", space_id)).await
    }

    /// `POST /api/spaces/{space_id}/join`
    pub async fn spaces_join(&self, space_id: &str) -> Result<MessageEnvelope<Space>> {
        self.execute(Call::new(JOIN).path("space_id", space_id)).await
    }

    /// `POST /api/spaces/{space_id}/leave`
    pub async fn spaces_leave(&self, space_id: &str) -> Result<MessageEnvelope> {
        self.execute(Call::new(LEAVE).path("space_id", space_id)).await
    }

    /// `GET /api/spaces/{space_id}/members`
    pub async fn spaces_members(&self, space_id: &str, query: &PageQuery) -> Result<Paginated<User>> {
        self.execute(Call::new(MEMBERS).path("space_id", space_id).query(query)?)
            .await
    }

    /// `POST /api/spaces/{space_id}/cover` (multipart)
    pub async fn spaces_upload_cover(
        &self,
        space_id: &str,
        cover: FileValue,
    ) -> Result<MessageEnvelope<Space>> {
        let form = FormFields::new().file("cover", cover);
        self.execute(
            Call::new(UPLOAD_COVER)
                .path("space_id", space_id)
                .body(RequestBody::Fields(form)),
        )
        .await
    }

    /// `GET /api/space-categories`
    pub async fn space_categories_list(&self) -> Result<SuccessEnvelope<Vec<SpaceCategory>>> {
        self.execute(Call::new(CATEGORIES_LIST)).await
    }

    /// `POST /api/space-categories` (multipart, optional image)
    pub async fn space_categories_create(
        &self,
        input: &SpaceCategoryInput,
        image: Option<FileValue>,
    ) -> Result<MessageEnvelope<SpaceCategory>> {
        let mut form = FormFields::from_serialize(input)?;
        if let Some(image) = image {
            form = form.file("image", image);
        }
        self.execute(Call::new(CATEGORIES_CREATE).body(RequestBody::Fields(form)))
            .await
    }

    /// `POST /api/space-categories/{category_id}/image` (multipart)
    pub async fn space_categories_upload_image(
        &self,
        category_id: &str,
        image: FileValue,
    ) -> Result<MessageEnvelope<SpaceCategory>> {
        let form = FormFields::new().file("image", image);
        self.execute(
            Call::new(CATEGORIES_UPLOAD_IMAGE)
                .path("category_id", category_id)
                .body(RequestBody::Fields(form)),
        )
        .await
    }

    /// `DELETE /api/space-categories/{category_id}`
    pub async fn space_categories_delete(&self, category_id: &str) -> Result<MessageEnvelope> {
        self.execute(Call::new(CATEGORIES_DELETE).path("category_id", category_id))
            .await
    }

    /// `GET /admin/spaces`
    pub async fn admin_spaces_list(&self, query: &ListQuery) -> Result<Paginated<Space>> {
        self.execute(Call::new(ADMIN_LIST).query_pairs(query.query_pairs()))
            .await
    }

    /// `POST /admin/spaces/{space_id}/flag`
    pub async fn admin_spaces_flag(
        &self,
        space_id: &str,
        body: &ReasonBody,
    ) -> Result<MessageEnvelope<Space>> {
        self.execute(Call::new(ADMIN_FLAG).path("space_id", space_id).json(body)?)
            .await
    }

    /// `POST /admin/spaces/{space_id}/unflag`
    pub async fn admin_spaces_unflag(&self, space_id: &str) -> Result<MessageEnvelope<Space>> {
        self.execute(Call::new(ADMIN_UNFLAG).path("space_id", space_id))
            .await
    }

    /// `DELETE /admin/spaces/{space_id}`
    pub async fn admin_spaces_delete(
        &self,
        space_id: &str,
        body: &ReasonBody,
    ) -> Result<MessageEnvelope> {
        self.execute(Call::new(ADMIN_DELETE).path("space_id", space_id).json(body)?)
            .await
    }

    /// `PATCH /admin/spaces/{space_id}/category`
    pub async fn admin_spaces_set_category(
        &self,
        space_id: &str,
        category_id: &str,
    ) -> Result<MessageEnvelope<Space>> {
        let body = SetCategoryBody {
            category: category_id.to_string(),
        };
        self.execute(
            Call::new(ADMIN_SET_CATEGORY)
                .path("space_id", space_id)
                .json(&body)?,
        )
        .await
    }
}
