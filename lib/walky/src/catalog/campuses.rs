//! Campuses, ambassadors, interests and age verification.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use walky_core::{ContentType, FileValue, FormFields, RequestBody, Route};

use crate::api_client::Call;
use crate::models::{Ambassador, Campus, CampusInput, Interest, MessageEnvelope, SuccessEnvelope};
use crate::{HttpClient, Result, WalkyApi};

/// `GET /api/campuses`
pub const LIST: Route = Route::get("campusesList", "/api/campuses").public();
/// `GET /api/campuses/{campus_id}`
pub const DETAIL: Route = Route::get("campusesDetail", "/api/campuses/{campus_id}").public();
/// `POST /api/campuses`
pub const CREATE: Route = Route::post("campusesCreate", "/api/campuses").secure();
/// `PATCH /api/campuses/{campus_id}`
pub const UPDATE: Route = Route::patch("campusesUpdate", "/api/campuses/{campus_id}").secure();
/// `DELETE /api/campuses/{campus_id}`
pub const DELETE: Route = Route::delete("campusesDelete", "/api/campuses/{campus_id}").secure();
/// `POST /api/campuses/{campus_id}/media`
pub const UPLOAD_MEDIA: Route = Route::post("campusesUploadMedia", "/api/campuses/{campus_id}/media")
    .secure()
    .content(ContentType::FormData);
/// `GET /ambassadors`
pub const AMBASSADORS_LIST: Route = Route::get("ambassadorsList", "/ambassadors").secure();
/// `POST /ambassadors`
pub const AMBASSADORS_CREATE: Route = Route::post("ambassadorsCreate", "/ambassadors").secure();
/// `DELETE /ambassadors/{ambassador_id}`
pub const AMBASSADORS_DELETE: Route =
    Route::delete("ambassadorsDelete", "/ambassadors/{ambassador_id}").secure();
/// `GET /api/interests`
pub const INTERESTS_LIST: Route = Route::get("interestsList", "/api/interests").public();
/// `POST /api/interests`
pub const INTERESTS_CREATE: Route = Route::post("interestsCreate", "/api/interests").secure();
/// `DELETE /api/interests/{interest_id}`
pub const INTERESTS_DELETE: Route =
    Route::delete("interestsDelete", "/api/interests/{interest_id}").secure();
/// `POST /age/verify`
pub const AGE_VERIFY: Route = Route::post("ageVerify", "/age/verify").secure();
/// `GET /age/policy`
pub const AGE_POLICY: Route = Route::get("agePolicy", "/age/policy").public();

/// Every route declared in this module.
pub const ROUTES: &[Route] = &[
    LIST,
    DETAIL,
    CREATE,
    UPDATE,
    DELETE,
    UPLOAD_MEDIA,
    AMBASSADORS_LIST,
    AMBASSADORS_CREATE,
    AMBASSADORS_DELETE,
    INTERESTS_LIST,
    INTERESTS_CREATE,
    INTERESTS_DELETE,
    AGE_VERIFY,
    AGE_POLICY,
];

/// Filters of the public campus list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CampusListQuery {
    /// Free-text filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Only active or only inactive campuses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

/// Makes a student the ambassador of a campus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AmbassadorInput {
    /// Ambassador user id.
    pub user: String,
    /// Campus id.
    pub campus: String,
    /// Display title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// New interest tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterestInput {
    /// Tag label.
    pub name: String,
    /// Grouping shown in the picker.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Icon name or URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Date of birth submitted for the age check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeVerification {
    /// Date of birth.
    pub date_of_birth: NaiveDate,
}

/// Outcome of an age check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeStatus {
    /// Whether the age check passed.
    pub verified: bool,
    /// Minimum age in years.
    #[serde(default)]
    pub minimum_age: Option<u8>,
}

/// Age requirements shown before sign-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgePolicy {
    /// Minimum age in years.
    pub minimum_age: u8,
    /// Policy text shown to users.
    #[serde(default)]
    pub text: Option<String>,
}

impl<C: HttpClient> WalkyApi<C> {
    /// `GET /api/campuses`
    pub async fn campuses_list(&self, query: &CampusListQuery) -> Result<SuccessEnvelope<Vec<Campus>>> {
        self.execute(Call::new(LIST).query(query)?).await
    }

    /// `GET /api/campuses/{campus_id}`
    pub async fn campuses_detail(&self, campus_id: &str) -> Result<Campus> {
        self.execute(Call::new(DETAIL).path("campus_id", campus_id)).await
    }

    /// `POST /api/campuses`
    pub async fn campuses_create(&self, input: &CampusInput) -> Result<MessageEnvelope<Campus>> {
        self.execute(Call::new(CREATE).json(input)?).await
    }

    /// `PATCH /api/campuses/{campus_id}`
    pub async fn campuses_update(
        &self,
        campus_id: &str,
        input: &CampusInput,
    ) -> Result<MessageEnvelope<Campus>> {
        self.execute(Call::new(UPDATE).path("campus_id", campus_id).json(input)?)
            .await
    }

    /// `DELETE /api/campuses/{campus_id}`
    pub async fn campuses_delete(&self, campus_id: &str) -> Result<MessageEnvelope> {
        self.execute(Call::new(DELETE).path("campus_id", campus_id)).await
    }

    /// `POST /api/campuses/{campus_id}/media` (multipart, logo and/or cover)
    pub async fn campuses_upload_media(
        &self,
        campus_id: &str,
        logo: Option<FileValue>,
        cover: Option<FileValue>,
    ) -> Result<MessageEnvelope<Campus>> {
        let mut form = FormFields::new();
        if let Some(logo) = logo {
            form = form.file("logo", logo);
        }
        if let Some(cover) = cover {
            form = form.file("cover", cover);
        }
        self.execute(
            Call::new(UPLOAD_MEDIA)
                .path("campus_id", campus_id)
                .body(RequestBody::Fields(form)),
        )
        .await
    }

    /// `GET /ambassadors`
    pub async fn ambassadors_list(&self) -> Result<SuccessEnvelope<Vec<Ambassador>>> {
        self.execute(Call::new(AMBASSADORS_LIST)).await
    }

    /// `POST /ambassadors`
    pub async fn ambassadors_create(
        &self,
        input: &AmbassadorInput,
    ) -> Result<MessageEnvelope<Ambassador>> {
        self.execute(Call::new(AMBASSADORS_CREATE).json(input)?).await
    }

    /// `DELETE /ambassadors/{ambassador_id}`
    pub async fn ambassadors_delete(&self, ambassador_id: &str) -> Result<MessageEnvelope> {
        self.execute(Call::new(AMBASSADORS_DELETE).path("ambassador_id", ambassador_id))
            .await
    }

    /// `GET /api/interests`
    pub async fn interests_list(&self) -> Result<Vec<Interest>> {
        self.execute(Call::new(INTERESTS_LIST)).await
    }

    /// `POST /api/interests`
    pub async fn interests_create(&self, input: &InterestInput) -> Result<MessageEnvelope<Interest>> {
        self.execute(Call::new(INTERESTS_CREATE).json(input)?).await
    }

    /// `DELETE /api/interests/{interest_id}`
    pub async fn interests_delete(&self, interest_id: &str) -> Result<MessageEnvelope> {
        self.execute(Call::new(INTERESTS_DELETE).path("interest_id", interest_id))
            .await
    }

    /// `POST /age/verify`
    pub async fn age_verify(&self, body: &AgeVerification) -> Result<AgeStatus> {
        self.execute(Call::new(AGE_VERIFY).json(body)?).await
    }

    /// `GET /age/policy`
    pub async fn age_policy(&self) -> Result<AgePolicy> {
        self.execute(Call::new(AGE_POLICY)).await
    }
}
