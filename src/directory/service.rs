use regex::Regex;
use thiserror::Error;
use tracing::{debug, warn};

use super::types::{Member, MemberListResponse, PeerView};

/// Failures while listing members. Always recovered inside `list_peers`;
/// callers never see this type.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("credential at {path} unreadable: {source}")]
    Credential {
        path: String,
        source: std::io::Error,
    },

    #[error("member list request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("member list endpoint returned {0}")]
    Status(reqwest::StatusCode),
}

/// Client for the orchestration API's read-only member listing.
pub struct PeerDirectory {
    base_url: String,
    token_path: String,
    worker_id: String,
    http_client: reqwest::Client,
}

impl PeerDirectory {
    pub fn new(base_url: &str, token_path: &str, worker_id: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token_path: token_path.to_string(),
            worker_id: worker_id.to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    /// Resolves the ordered peer set for `role_label` and this worker's
    /// position in it.
    ///
    /// Never fails: any directory problem degrades to a single-peer view so
    /// the cycle still makes progress alone. The resulting over-fetch when
    /// several replicas degrade at once is absorbed by the at-least-once
    /// publish contract.
    pub async fn list_peers(&self, role_label: &str) -> PeerView {
        match self.try_list_peers(role_label).await {
            Ok(view) => view,
            Err(err) => {
                warn!(
                    "Member listing failed, degrading to single-peer view: {}",
                    err
                );
                PeerView::solo(&self.worker_id)
            }
        }
    }

    async fn try_list_peers(&self, role_label: &str) -> Result<PeerView, DirectoryError> {
        let token = tokio::fs::read_to_string(&self.token_path)
            .await
            .map_err(|source| DirectoryError::Credential {
                path: self.token_path.clone(),
                source,
            })?;

        let url = format!("{}/members", self.base_url);
        let response = self
            .http_client
            .get(&url)
            .bearer_auth(token.trim())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DirectoryError::Status(response.status()));
        }

        let listing: MemberListResponse = response.json().await?;
        let peers = order_role_members(listing.members, role_label);

        let self_index = match peers.iter().position(|id| id == &self.worker_id) {
            Some(index) => index,
            None => {
                // Directory not yet consistent with our own registration.
                // Index 0 keeps the downstream math valid; never a sentinel.
                warn!(
                    "Own id {} absent from member list, assuming index 0",
                    self.worker_id
                );
                0
            }
        };

        debug!(
            "Resolved {} peer(s) for role {}, self at index {}",
            peers.len(),
            role_label,
            self_index
        );

        Ok(PeerView { peers, self_index })
    }
}

/// Filters `members` to the given role label and sorts them by a stable key.
///
/// The key prefers a trailing numeric suffix (so `worker-2` sorts before
/// `worker-10`), falls back to the full identifier lexicographically, and is
/// a pure function of identifier content. Every replica applying it to the
/// same listing derives the same order.
pub(super) fn order_role_members(members: Vec<Member>, role_label: &str) -> Vec<String> {
    let suffix_re = Regex::new(r"(\d+)$").unwrap();

    let mut keyed: Vec<(Option<u64>, String)> = members
        .into_iter()
        .filter(|member| member.labels.get("role").map(String::as_str) == Some(role_label))
        .map(|member| {
            let suffix = suffix_re
                .captures(&member.id)
                .and_then(|cap| cap.get(1))
                .and_then(|m| m.as_str().parse::<u64>().ok());
            (suffix, member.id)
        })
        .collect();

    keyed.sort_by(|a, b| match (&a.0, &b.0) {
        (Some(x), Some(y)) => x.cmp(y).then_with(|| a.1.cmp(&b.1)),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.1.cmp(&b.1),
    });

    keyed.into_iter().map(|(_, id)| id).collect()
}
