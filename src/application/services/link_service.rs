//! Link creation and resolution service.

use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{CodeGenerator, is_reserved_code, validate_short_code};
use crate::utils::url_validator::is_valid_long_url;
use serde_json::json;
use tracing::{debug, info, warn};

/// Attempt budget used when `SHORT_CODE_MAX_ATTEMPTS` is not set.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

/// Settings the link service needs from the startup configuration.
#[derive(Debug, Clone)]
pub struct LinkSettings {
    pub generator: CodeGenerator,
    /// Maximum number of candidate codes generated per shorten request.
    pub max_attempts: u32,
    /// Everything before the code in a short URL, without a trailing slash,
    /// e.g. `http://localhost:8080/go`.
    pub short_url_base: String,
}

/// Service for creating and resolving shortened links.
///
/// # Allocation
///
/// Codes are allocated in two layers. A cheap pre-check asks the repository
/// whether the candidate exists; the repository insert then enforces the
/// uniqueness constraint for real. Both a pre-check hit and a
/// [`AppError::DuplicateCode`] from the insert consume one attempt from the same
/// budget, and the request fails with [`AppError::ExhaustedRetries`] once it is
/// spent.
pub struct LinkService<L: LinkRepository + ?Sized = dyn LinkRepository> {
    link_repository: Arc<L>,
    settings: LinkSettings,
}

impl<L: LinkRepository + ?Sized> LinkService<L> {
    /// Creates a new link service.
    pub fn new(link_repository: Arc<L>, settings: LinkSettings) -> Self {
        Self {
            link_repository,
            settings,
        }
    }

    /// Shortens `long_url` and persists the new link.
    ///
    /// The long URL is stored exactly as given. Shortening the same URL twice
    /// produces two links with different codes.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidInput`] if the URL fails validation
    /// - [`AppError::ExhaustedRetries`] if no free code was found within the budget
    /// - [`AppError::Storage`] on any other storage fault (not retried)
    pub async fn shorten(&self, long_url: String) -> Result<Link, AppError> {
        if !is_valid_long_url(&long_url) {
            debug!(long_url = %long_url, "Rejected long URL");
            return Err(AppError::bad_request(
                "That doesn't look like a valid URL for me to shorten",
                json!({ "long_url": long_url }),
            ));
        }

        let mut attempts = 0;

        loop {
            let short_code = self.next_free_code(&mut attempts).await?;

            let new_link = NewLink {
                long_url: long_url.clone(),
                short_url: self.short_url(&short_code),
                short_code,
            };

            match self.link_repository.insert(new_link).await {
                Ok(link) => {
                    metrics::counter!("links_created_total").increment(1);
                    info!(
                        code = %link.short_code,
                        short_url = %link.short_url,
                        attempts,
                        "Created short link"
                    );
                    return Ok(link);
                }
                Err(AppError::DuplicateCode { code }) => {
                    metrics::counter!("shortcode_collisions_total", "stage" => "insert")
                        .increment(1);
                    debug!(code = %code, attempts, "Short code taken by a concurrent insert");
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Allocates a short code that is not currently stored.
    ///
    /// The result is only a snapshot: another writer may take the code before
    /// it is inserted, which is why [`Self::shorten`] also handles
    /// [`AppError::DuplicateCode`] from the insert.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ExhaustedRetries`] after `max_attempts` candidates
    /// were all taken.
    pub async fn allocate_unique_code(&self) -> Result<String, AppError> {
        let mut attempts = 0;
        self.next_free_code(&mut attempts).await
    }

    /// Resolves a short code to the long URL it was created for.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidInput`] if the code is empty or malformed (no lookup is made)
    /// - [`AppError::NotFound`] if no link carries this code
    /// - [`AppError::Storage`] on database errors
    pub async fn resolve(&self, short_code: &str) -> Result<String, AppError> {
        self.get_link_by_code(short_code)
            .await
            .map(|link| link.long_url)
    }

    /// Retrieves the full link record for a short code.
    ///
    /// # Errors
    ///
    /// Same as [`Self::resolve`].
    pub async fn get_link_by_code(&self, short_code: &str) -> Result<Link, AppError> {
        validate_short_code(short_code)?;

        self.link_repository
            .find_by_code(short_code)
            .await?
            .ok_or_else(|| {
                AppError::not_found(
                    "A link with that short code was not found",
                    json!({ "code": short_code }),
                )
            })
    }

    /// Counts stored links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] if the store is unreachable.
    pub async fn count_links(&self) -> Result<i64, AppError> {
        self.link_repository.count().await
    }

    /// Constructs the full short URL for a code.
    pub fn short_url(&self, short_code: &str) -> String {
        format!("{}/{}", self.settings.short_url_base, short_code)
    }

    /// Generates candidates until one is free or `attempts` reaches the budget.
    ///
    /// `attempts` is shared with the caller so that insert-time collisions
    /// count against the same limit. A candidate equal to a reserved route
    /// segment counts as taken without asking the store.
    async fn next_free_code(&self, attempts: &mut u32) -> Result<String, AppError> {
        while *attempts < self.settings.max_attempts {
            *attempts += 1;
            let candidate = self.settings.generator.generate();

            if is_reserved_code(&candidate) {
                metrics::counter!("shortcode_collisions_total", "stage" => "reserved")
                    .increment(1);
                debug!(code = %candidate, attempt = *attempts, "Short code is a reserved route");
                continue;
            }

            if !self.link_repository.exists(&candidate).await? {
                return Ok(candidate);
            }

            metrics::counter!("shortcode_collisions_total", "stage" => "precheck").increment(1);
            debug!(code = %candidate, attempt = *attempts, "Short code already in use");
        }

        metrics::counter!("shortcode_allocation_exhausted_total").increment(1);
        warn!(
            attempts = self.settings.max_attempts,
            code_length = self.settings.generator.length(),
            alphabet_size = self.settings.generator.alphabet().len(),
            "Gave up allocating a short code; consider a longer code or larger alphabet"
        );

        Err(AppError::ExhaustedRetries {
            attempts: self.settings.max_attempts,
        })
    }
}
