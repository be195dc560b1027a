//! List trait for fetching inventories of a resource kind.

use async_trait::async_trait;

use crate::client::VropsClient;
use crate::error::Result;
use crate::models::Resource;
use crate::pagination::Page;
use crate::session::Session;

/// Default page size for list operations.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Maximum pages to fetch (safety limit).
const MAX_PAGES: u32 = 1000;

/// List all platform resources of one kind, projected into a record type.
///
/// Implementors name the resource kind they map to and provide the
/// projection from the generic [`Resource`]; page fetching and the
/// sequential drive over all pages are provided.
///
/// # Example
///
/// ```ignore
/// use vropsapi::{List, Session, VirtualMachine, VropsClient};
///
/// let client = VropsClient::from_env()?;
/// let mut session = Session::new();
///
/// // Fetch a single page
/// let page = VirtualMachine::list_page(&client, &session, 0, 50).await?;
///
/// // Fetch every page
/// let machines = VirtualMachine::list_all(&client, &mut session).await?;
/// ```
#[async_trait]
pub trait List: Sized + Send {
    /// The `resourceKind` query value this record type maps to.
    const RESOURCE_KIND: &'static str;

    /// Project one decoded resource into this record.
    ///
    /// Projection never fails: enrichment problems are recorded on the
    /// projected record itself.
    fn project(resource: &Resource) -> Self;

    /// Fetch and project one page of this kind.
    ///
    /// The session must already hold a token; see
    /// [`VropsClient::ensure_authenticated`].
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the page does not decode.
    async fn list_page(
        client: &VropsClient,
        session: &Session,
        page: u32,
        page_size: u32,
    ) -> Result<Page<Self>> {
        let response = client
            .resources_page(session, Self::RESOURCE_KIND, page, page_size)
            .await?;
        let items = response.resources.iter().map(Self::project).collect();
        Ok(Page::new(items, page, page_size, response.page, response.links))
    }

    /// Fetch every page of this kind, in order.
    ///
    /// Authenticates the session if needed, then walks pages 0, 1, 2, …
    /// strictly sequentially until a page comes back shorter than
    /// [`DEFAULT_PAGE_SIZE`]. One page is fetched and fully processed before
    /// the next is requested.
    ///
    /// # Errors
    ///
    /// Returns an error if authentication fails or any page request or
    /// decode fails; a mid-listing failure aborts the whole operation.
    async fn list_all(client: &VropsClient, session: &mut Session) -> Result<Vec<Self>> {
        client.ensure_authenticated(session).await?;

        let mut all_items = Vec::new();
        let mut page = 0;

        loop {
            let result = Self::list_page(client, session, page, DEFAULT_PAGE_SIZE).await?;
            let has_more = result.has_more;
            all_items.extend(result);

            if !has_more {
                break;
            }
            page += 1;

            // Safety limit to prevent infinite loops
            if page >= MAX_PAGES {
                tracing::warn!("reached pagination limit of {} pages, stopping", MAX_PAGES);
                break;
            }
        }

        Ok(all_items)
    }
}
