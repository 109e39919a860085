//! Administrative service: data entry and admin list views

use validator::Validate;

use super::media::MediaService;
use crate::{
    error::{AppError, AppResult},
    filters::BookFilter,
    models::{
        admin::{
            AdminBookFilters, AdminBookListResponse, AdminListResponse, AdminRow, ModelAdminView,
            AUTHOR_ADMIN, BOOK_ADMIN, LANGUAGE_ADMIN, PUBLISHER_ADMIN, REGISTERED, TAG_ADMIN,
        },
        author::{Author, AuthorInput},
        book::{AdminBookQuery, Book, BookInput},
        named::{NamedEntity, NamedInput, NamedKind},
    },
    pagination::{PageRequest, ADMIN_PAGE_SIZE},
    repository::Repository,
};

#[derive(Clone)]
pub struct AdminService {
    repository: Repository,
    media: MediaService,
}

impl AdminService {
    pub fn new(repository: Repository, media: MediaService) -> Self {
        Self { repository, media }
    }

    /// List configurations of every registered entity
    pub fn models(&self) -> Vec<ModelAdminView> {
        REGISTERED.iter().map(ModelAdminView::from).collect()
    }

    // =========================================================================
    // BOOKS
    // =========================================================================

    /// Admin book list: filtered by publisher and year, ordered by title
    pub async fn list_books(&self, query: &AdminBookQuery) -> AppResult<AdminBookListResponse> {
        let filter = BookFilter::from_admin_query(query)?;

        let total = self.repository.books_count(&filter).await?;
        let page = PageRequest::resolve(query.page.as_deref(), total, ADMIN_PAGE_SIZE);
        let rows = self.repository.books_admin_rows(&filter, &page).await?;

        Ok(AdminBookListResponse {
            columns: BOOK_ADMIN.columns(),
            rows,
            page: page.info(),
            filters: AdminBookFilters {
                publishers: self.repository.named_all(NamedKind::Publisher).await?,
                years: self.repository.books_distinct_years().await?,
            },
        })
    }

    pub async fn get_book(&self, id: i32) -> AppResult<Book> {
        self.repository.books_get_by_id(id).await
    }

    /// Create a book; the ISBN must not be in use
    pub async fn create_book(&self, input: BookInput) -> AppResult<Book> {
        input.validate()?;

        if self.repository.books_isbn_exists(&input.isbn, None).await? {
            return Err(AppError::Conflict(format!(
                "A book with ISBN {} already exists",
                input.isbn
            )));
        }

        let book = self.repository.books_create(&input).await?;
        tracing::info!("Created book id={} \"{}\"", book.id, book);
        Ok(book)
    }

    /// Replace a book; the ISBN must not be used by another book
    pub async fn update_book(&self, id: i32, input: BookInput) -> AppResult<Book> {
        input.validate()?;

        // Check if book exists
        self.repository.books_get_by_id(id).await?;

        if self.repository.books_isbn_exists(&input.isbn, Some(id)).await? {
            return Err(AppError::Conflict(format!(
                "A book with ISBN {} already exists",
                input.isbn
            )));
        }

        let book = self.repository.books_update(id, &input).await?;
        tracing::info!("Updated book id={}", id);
        Ok(book)
    }

    pub async fn delete_book(&self, id: i32) -> AppResult<()> {
        self.repository.books_delete(id).await?;
        tracing::info!("Deleted book id={}", id);
        Ok(())
    }

    /// Store an uploaded cover and attach it to the book
    pub async fn upload_cover(&self, id: i32, file_name: &str, data: &[u8]) -> AppResult<Book> {
        self.repository.books_get_by_id(id).await?;
        let path = self.media.store_image(file_name, data).await?;
        self.repository.books_set_cover(id, &path).await
    }

    // =========================================================================
    // AUTHORS
    // =========================================================================

    pub async fn list_authors(&self, page: Option<&str>) -> AppResult<AdminListResponse> {
        let total = self.repository.authors_count().await?;
        let page = PageRequest::resolve(page, total, ADMIN_PAGE_SIZE);
        let authors = self.repository.authors_page(&page).await?;

        Ok(AdminListResponse {
            columns: AUTHOR_ADMIN.columns(),
            rows: authors.iter().map(AdminRow::from).collect(),
            page: page.info(),
        })
    }

    pub async fn get_author(&self, id: i32) -> AppResult<Author> {
        self.repository.authors_get_by_id(id).await
    }

    pub async fn create_author(&self, input: AuthorInput) -> AppResult<Author> {
        input.validate()?;
        let author = self.repository.authors_create(&input).await?;
        tracing::info!("Created author id={} \"{}\"", author.id, author);
        Ok(author)
    }

    pub async fn update_author(&self, id: i32, input: AuthorInput) -> AppResult<Author> {
        input.validate()?;
        let author = self.repository.authors_update(id, &input).await?;
        tracing::info!("Updated author id={}", id);
        Ok(author)
    }

    pub async fn delete_author(&self, id: i32) -> AppResult<()> {
        self.repository.authors_delete(id).await?;
        tracing::info!("Deleted author id={}", id);
        Ok(())
    }

    /// Store an uploaded portrait and attach it to the author
    pub async fn upload_picture(&self, id: i32, file_name: &str, data: &[u8]) -> AppResult<Author> {
        self.repository.authors_get_by_id(id).await?;
        let path = self.media.store_image(file_name, data).await?;
        self.repository.authors_set_picture(id, &path).await
    }

    // =========================================================================
    // PUBLISHERS / LANGUAGES / TAGS
    // =========================================================================

    pub async fn list_named(&self, kind: NamedKind, page: Option<&str>) -> AppResult<AdminListResponse> {
        let total = self.repository.named_count(kind).await?;
        let page = PageRequest::resolve(page, total, ADMIN_PAGE_SIZE);
        let rows = self.repository.named_page(kind, &page).await?;

        let admin = match kind {
            NamedKind::Publisher => PUBLISHER_ADMIN,
            NamedKind::Language => LANGUAGE_ADMIN,
            NamedKind::Tag => TAG_ADMIN,
        };

        Ok(AdminListResponse {
            columns: admin.columns(),
            rows: rows.iter().map(AdminRow::from).collect(),
            page: page.info(),
        })
    }

    pub async fn get_named(&self, kind: NamedKind, id: i32) -> AppResult<NamedEntity> {
        self.repository.named_get_by_id(kind, id).await
    }

    pub async fn create_named(&self, kind: NamedKind, input: NamedInput) -> AppResult<NamedEntity> {
        input.validate_for(kind)?;
        let entity = self.repository.named_create(kind, input.name.trim()).await?;
        tracing::info!("Created {} id={} \"{}\"", kind.label(), entity.id, entity);
        Ok(entity)
    }

    pub async fn update_named(
        &self,
        kind: NamedKind,
        id: i32,
        input: NamedInput,
    ) -> AppResult<NamedEntity> {
        input.validate_for(kind)?;
        let entity = self.repository.named_update(kind, id, input.name.trim()).await?;
        tracing::info!("Updated {} id={}", kind.label(), id);
        Ok(entity)
    }

    pub async fn delete_named(&self, kind: NamedKind, id: i32) -> AppResult<()> {
        self.repository.named_delete(kind, id).await?;
        tracing::info!("Deleted {} id={}", kind.label(), id);
        Ok(())
    }
}
