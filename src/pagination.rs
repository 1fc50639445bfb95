// Copyright (C) 2021  Braiins Systems s.r.o.
//
// This file is part of Braiins Open-Source Initiative (BOSI).
//
// BOSI is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.
//
// Please, keep in mind that we may also license BOSI or any part thereof
// under a proprietary license. For more information on the terms and conditions
// of such proprietary license or if you have any other questions, please
// contact us at opensource@braiins.com.

//! Read-only HTTP/JSON projection over cached pool statistics.
//!
//! [`Cache`] is a collaborator contract: the cache population pipeline, persistent storage, and
//! account management that feed it live entirely outside this crate. Everything here does is
//! slice an already-materialized snapshot and serialize it.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

/// A single mined block credited to an account.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct MinedWork {
    pub account_id: String,
    pub height: u32,
    pub hash: String,
}

/// Pending share of future pool payouts attributed to an account.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Quota {
    pub account_id: String,
    pub amount: u64,
}

/// A worker connection tracked for an account.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Client {
    pub worker_name: String,
    pub hash_rate: f64,
}

/// A pending or archived payout for an account.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Payment {
    pub account_id: String,
    pub amount: u64,
    pub created_on: u64,
}

/// A page of results: `data[first:last]` of the underlying sequence, plus the full unfiltered
/// `count`.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub count: usize,
}

/// Computes `first = (pageNumber-1) * pageSize`, `last = min(first+pageSize, count)`, and slices
/// `items` accordingly. `first >= count` yields an empty `data` with the full `count` preserved.
pub fn paginate<T: Clone>(items: &[T], page_number: u64, page_size: u64) -> Page<T> {
    let count = items.len();
    let first = ((page_number - 1) * page_size) as usize;
    if first >= count {
        return Page {
            data: Vec::new(),
            count,
        };
    }
    let last = (first + page_size as usize).min(count);
    Page {
        data: items[first..last].to_vec(),
        count,
    }
}

/// Snapshot accessors the cache must provide. Each call must observe a stable sequence for its
/// own duration; the cache owns whatever locking that requires.
pub trait Cache: Send + Sync {
    fn mined_work(&self) -> Vec<MinedWork>;
    fn reward_quotas(&self) -> Vec<Quota>;
    fn clients(&self, account_id: &str) -> Vec<Client>;
    fn pending_payments(&self, account_id: &str) -> Vec<Payment>;
    fn archived_payments(&self, account_id: &str) -> Vec<Payment>;
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageParams {
    page_number: Option<u64>,
    page_size: Option<u64>,
}

impl PageParams {
    fn validate(&self) -> Result<(u64, u64), Response> {
        match (self.page_number, self.page_size) {
            (Some(page_number), Some(page_size)) if page_number >= 1 && page_size >= 1 => {
                Ok((page_number, page_size))
            }
            _ => Err((StatusCode::BAD_REQUEST, "invalid pageNumber/pageSize").into_response()),
        }
    }
}

fn paginated_response<T: Serialize + Clone>(
    items: Vec<T>,
    params: &PageParams,
) -> Response {
    let (page_number, page_size) = match params.validate() {
        Ok(ok) => ok,
        Err(response) => return response,
    };
    let page = paginate(&items, page_number, page_size);
    match serde_json::to_value(&page) {
        Ok(value) => Json(value).into_response(),
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "failed to encode response").into_response(),
    }
}

async fn blocks_handler<C: Cache + 'static>(
    State(cache): State<Arc<C>>,
    Query(params): Query<PageParams>,
) -> Response {
    paginated_response(cache.mined_work(), &params)
}

async fn reward_quotas_handler<C: Cache + 'static>(
    State(cache): State<Arc<C>>,
    Query(params): Query<PageParams>,
) -> Response {
    paginated_response(cache.reward_quotas(), &params)
}

/// Filters the full mined-work sequence by `accountID` equality before counting, per the spec's
/// account-scoped endpoint semantics.
async fn account_blocks_handler<C: Cache + 'static>(
    State(cache): State<Arc<C>>,
    Path(account_id): Path<String>,
    Query(params): Query<PageParams>,
) -> Response {
    let filtered: Vec<MinedWork> = cache
        .mined_work()
        .into_iter()
        .filter(|w| w.account_id == account_id)
        .collect();
    paginated_response(filtered, &params)
}

async fn account_clients_handler<C: Cache + 'static>(
    State(cache): State<Arc<C>>,
    Path(account_id): Path<String>,
    Query(params): Query<PageParams>,
) -> Response {
    paginated_response(cache.clients(&account_id), &params)
}

async fn account_pending_payments_handler<C: Cache + 'static>(
    State(cache): State<Arc<C>>,
    Path(account_id): Path<String>,
    Query(params): Query<PageParams>,
) -> Response {
    paginated_response(cache.pending_payments(&account_id), &params)
}

async fn account_archived_payments_handler<C: Cache + 'static>(
    State(cache): State<Arc<C>>,
    Path(account_id): Path<String>,
    Query(params): Query<PageParams>,
) -> Response {
    paginated_response(cache.archived_payments(&account_id), &params)
}

/// Builds the pagination view's router over a shared cache handle.
pub fn router<C: Cache + 'static>(cache: Arc<C>) -> Router {
    Router::new()
        .route("/blocks", get(blocks_handler::<C>))
        .route("/rewardquotas", get(reward_quotas_handler::<C>))
        .route("/account/:account_id/blocks", get(account_blocks_handler::<C>))
        .route("/account/:account_id/clients", get(account_clients_handler::<C>))
        .route(
            "/account/:account_id/payments/pending",
            get(account_pending_payments_handler::<C>),
        )
        .route(
            "/account/:account_id/payments/archived",
            get(account_archived_payments_handler::<C>),
        )
        .with_state(cache)
}

#[cfg(test)]
mod test {
    use super::*;

    fn items(count: usize) -> Vec<u32> {
        (0..count as u32).collect()
    }

    /// S8
    #[test]
    fn test_paginate_s8() {
        let page = paginate(&items(7), 3, 3);
        assert_eq!(page.data, vec![6]);
        assert_eq!(page.count, 7);
    }

    #[test]
    fn test_paginate_first_page() {
        let page = paginate(&items(10), 1, 3);
        assert_eq!(page.data, vec![0, 1, 2]);
        assert_eq!(page.count, 10);
    }

    #[test]
    fn test_paginate_first_beyond_count_is_empty() {
        let page = paginate(&items(5), 10, 3);
        assert!(page.data.is_empty());
        assert_eq!(page.count, 5);
    }

    #[test]
    fn test_paginate_empty_underlying_sequence() {
        let page = paginate(&items(0), 1, 3);
        assert!(page.data.is_empty());
        assert_eq!(page.count, 0);
    }

    #[test]
    fn test_paginate_bounds_property() {
        for count in [0usize, 1, 2, 7, 20] {
            for page_size in [1u64, 3, 5] {
                for page_number in [1u64, 2, 3, 10] {
                    let page = paginate(&items(count), page_number, page_size);
                    let first = (page_number - 1) * page_size;
                    let expected_len = (count as u64)
                        .saturating_sub(first)
                        .min(page_size) as usize;
                    assert_eq!(page.data.len(), expected_len);
                    assert_eq!(page.count, count);
                }
            }
        }
    }

    struct FixtureCache;

    impl Cache for FixtureCache {
        fn mined_work(&self) -> Vec<MinedWork> {
            vec![
                MinedWork {
                    account_id: "acct1".into(),
                    height: 10,
                    hash: "aa".into(),
                },
                MinedWork {
                    account_id: "acct2".into(),
                    height: 11,
                    hash: "bb".into(),
                },
            ]
        }
        fn reward_quotas(&self) -> Vec<Quota> {
            vec![]
        }
        fn clients(&self, _account_id: &str) -> Vec<Client> {
            vec![]
        }
        fn pending_payments(&self, _account_id: &str) -> Vec<Payment> {
            vec![]
        }
        fn archived_payments(&self, _account_id: &str) -> Vec<Payment> {
            vec![]
        }
    }

    #[test]
    fn test_account_filter_is_applied_before_counting() {
        let cache = FixtureCache;
        let filtered: Vec<MinedWork> = cache
            .mined_work()
            .into_iter()
            .filter(|w| w.account_id == "acct1")
            .collect();
        let page = paginate(&filtered, 1, 10);
        assert_eq!(page.count, 1);
        assert_eq!(page.data.len(), 1);
    }

    #[test]
    fn test_router_builds() {
        let _router = router(Arc::new(FixtureCache));
    }
}
