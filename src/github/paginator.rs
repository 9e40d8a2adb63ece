use super::api::Page;
use anyhow::Result;
use std::future::Future;

const FIRST_PAGE: u32 = 1;

/// Walks a paginated listing one page at a time, starting at page 1.
///
/// The walk ends at the first page without a `next` link. A `next` link that
/// does not move the cursor forward also ends it, so a misbehaving server
/// cannot make the walk loop. A paginator is consumed once; after the last page
/// or an error every further call returns `Ok(None)`.
pub struct Paginator<F> {
    fetch: F,
    cursor: Option<u32>,
}

impl<F, Fut, T> Paginator<F>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    pub fn new(fetch: F) -> Self {
        Paginator {
            fetch,
            cursor: Some(FIRST_PAGE),
        }
    }

    pub async fn next_page(&mut self) -> Result<Option<Vec<T>>> {
        let Some(page) = self.cursor.take() else {
            return Ok(None);
        };

        log::trace!("fetching page {}", page);
        let Page { items, next_page } = (self.fetch)(page).await?;

        self.cursor = next_page.filter(|next| *next > page);

        Ok(Some(items))
    }

    pub async fn collect_all(mut self) -> Result<Vec<T>> {
        let mut items = Vec::new();

        while let Some(page) = self.next_page().await? {
            items.extend(page);
        }

        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn pages() -> Vec<Page<&'static str>> {
        vec![
            Page::new(vec!["a", "b"], Some(2)),
            Page::new(vec!["c"], Some(3)),
            Page::new(vec!["d", "e"], None),
        ]
    }

    #[tokio::test]
    async fn should_concatenate_pages_in_order() -> Result<()> {
        let visited = RefCell::new(Vec::new());
        let pages = pages();

        let items = Paginator::new(|page: u32| {
            visited.borrow_mut().push(page);
            let result = pages[page as usize - 1].clone();
            async move { Ok(result) }
        })
        .collect_all()
        .await?;

        assert_eq!(items, vec!["a", "b", "c", "d", "e"]);
        assert_eq!(*visited.borrow(), vec![1, 2, 3]);

        Ok(())
    }

    #[tokio::test]
    async fn should_stop_after_first_page_without_link() -> Result<()> {
        let calls = RefCell::new(0);

        let items: Vec<u32> = Paginator::new(|_| {
            *calls.borrow_mut() += 1;
            async { Ok(Page::new(vec![], None)) }
        })
        .collect_all()
        .await?;

        assert!(items.is_empty());
        assert_eq!(*calls.borrow(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn should_stop_when_next_page_does_not_advance() -> Result<()> {
        let calls = RefCell::new(0);

        let items = Paginator::new(|page: u32| {
            *calls.borrow_mut() += 1;
            async move { Ok(Page::new(vec![page], Some(page))) }
        })
        .collect_all()
        .await?;

        assert_eq!(items, vec![1]);
        assert_eq!(*calls.borrow(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn should_follow_skipped_page_numbers() -> Result<()> {
        let visited = RefCell::new(Vec::new());

        let items = Paginator::new(|page: u32| {
            visited.borrow_mut().push(page);
            let next = if page < 5 { Some(page + 2) } else { None };
            async move { Ok(Page::new(vec![page], next)) }
        })
        .collect_all()
        .await?;

        assert_eq!(items, vec![1, 3, 5]);
        assert_eq!(*visited.borrow(), vec![1, 3, 5]);

        Ok(())
    }

    #[tokio::test]
    async fn should_yield_pages_lazily() -> Result<()> {
        let calls = RefCell::new(0);

        let mut paginator = Paginator::new(|page: u32| {
            *calls.borrow_mut() += 1;
            async move { Ok(Page::new(vec![page], Some(page + 1))) }
        });

        assert_eq!(paginator.next_page().await?, Some(vec![1]));
        assert_eq!(paginator.next_page().await?, Some(vec![2]));
        assert_eq!(*calls.borrow(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn should_surface_errors_and_not_restart() -> Result<()> {
        let mut paginator = Paginator::new(|page: u32| async move {
            if page == 2 {
                anyhow::bail!("rate limited");
            }
            Ok(Page::new(vec![page], Some(page + 1)))
        });

        assert_eq!(paginator.next_page().await?, Some(vec![1]));
        assert!(paginator.next_page().await.is_err());
        assert_eq!(paginator.next_page().await?, None);

        Ok(())
    }
}
