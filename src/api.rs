#![allow(async_fn_in_trait)]

use gloo_net::http::{Request, Response};
use urlencoding::encode;

use crate::error::{ClientError, ClientResult};
use crate::model::{Catalog, MutationReply};

/// The three calls the activities page makes against the signup service.
pub trait ActivitiesApi {
    /// `GET /activities`
    async fn list_activities(&self) -> ClientResult<Catalog>;

    /// `POST /activities/{activity}/signup?email={email}`
    async fn signup(&self, activity: &str, email: &str) -> ClientResult<MutationReply>;

    /// `DELETE /activities/{activity}/participants?email={email}`
    async fn remove_participant(&self, activity: &str, email: &str) -> ClientResult<MutationReply>;
}

pub fn activities_url(base: &str) -> String {
    format!("{base}/activities")
}

pub fn signup_url(base: &str, activity: &str, email: &str) -> String {
    format!("{base}/activities/{}/signup?email={}", encode(activity), encode(email))
}

pub fn participant_url(base: &str, activity: &str, email: &str) -> String {
    format!("{base}/activities/{}/participants?email={}", encode(activity), encode(email))
}

/// Browser fetch client.
#[derive(Debug, Clone, PartialEq)]
pub struct GlooClient {
    base: String,
}

impl GlooClient {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    async fn read_reply(resp: Response) -> ClientResult<MutationReply> {
        let ok = resp.ok();
        let status = resp.status();
        let text = resp.text().await?;
        log::debug!("HTTP {status} ({} bytes)", text.len());
        MutationReply::from_parts(ok, status, &text)
    }
}

impl ActivitiesApi for GlooClient {
    async fn list_activities(&self) -> ClientResult<Catalog> {
        let url = activities_url(&self.base);
        log::debug!("GET {url}");
        let resp = Request::get(&url).send().await?;
        if !resp.ok() {
            return Err(ClientError::Status(resp.status()));
        }
        Catalog::from_json(&resp.text().await?)
    }

    async fn signup(&self, activity: &str, email: &str) -> ClientResult<MutationReply> {
        let url = signup_url(&self.base, activity, email);
        log::debug!("POST {url}");
        let resp = Request::post(&url).send().await?;
        Self::read_reply(resp).await
    }

    async fn remove_participant(&self, activity: &str, email: &str) -> ClientResult<MutationReply> {
        let url = participant_url(&self.base, activity, email);
        log::debug!("DELETE {url}");
        let resp = Request::delete(&url).send().await?;
        Self::read_reply(resp).await
    }
}
