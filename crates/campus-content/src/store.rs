//! Content store seam
//!
//! One async trait covering the owned content entities, with an
//! in-memory implementation for single-process use and testing. A
//! relational backend implements the same trait over its tables.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::course::Course;
use crate::error::ContentResult;
use crate::material::Material;
use crate::rating::Rating;
use crate::review::Review;
use crate::tag::Tag;

/// Persist courses, materials, ratings, reviews, and tags.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Persist a new course.
    async fn insert_course(&self, course: Course) -> ContentResult<()>;
    /// Look up a course by id.
    async fn get_course(&self, id: Uuid) -> ContentResult<Option<Course>>;
    /// Persist an edited course.
    async fn update_course(&self, course: Course) -> ContentResult<()>;
    /// Remove a course. Returns `true` if it existed.
    async fn delete_course(&self, id: Uuid) -> ContentResult<bool>;

    /// Persist a new material.
    async fn insert_material(&self, material: Material) -> ContentResult<()>;
    /// Look up a material by id.
    async fn get_material(&self, id: Uuid) -> ContentResult<Option<Material>>;
    /// Persist an edited material.
    async fn update_material(&self, material: Material) -> ContentResult<()>;
    /// Remove a material. Returns `true` if it existed.
    async fn delete_material(&self, id: Uuid) -> ContentResult<bool>;
    /// List the materials uploaded into a course.
    async fn list_materials(&self, course_id: Uuid) -> ContentResult<Vec<Material>>;

    /// Persist a new rating.
    async fn insert_rating(&self, rating: Rating) -> ContentResult<()>;
    /// Look up a rating by id.
    async fn get_rating(&self, id: Uuid) -> ContentResult<Option<Rating>>;
    /// Persist an edited rating.
    async fn update_rating(&self, rating: Rating) -> ContentResult<()>;
    /// Remove a rating. Returns `true` if it existed.
    async fn delete_rating(&self, id: Uuid) -> ContentResult<bool>;

    /// Persist a new review.
    async fn insert_review(&self, review: Review) -> ContentResult<()>;
    /// Look up a review by id.
    async fn get_review(&self, id: Uuid) -> ContentResult<Option<Review>>;
    /// Persist an edited review.
    async fn update_review(&self, review: Review) -> ContentResult<()>;
    /// Remove a review. Returns `true` if it existed.
    async fn delete_review(&self, id: Uuid) -> ContentResult<bool>;

    /// Persist a new tag.
    async fn insert_tag(&self, tag: Tag) -> ContentResult<()>;
    /// Look up a tag by id.
    async fn get_tag(&self, id: Uuid) -> ContentResult<Option<Tag>>;
    /// Remove a tag. Returns `true` if it existed.
    async fn delete_tag(&self, id: Uuid) -> ContentResult<bool>;
}

/// In-memory content store.
#[derive(Default)]
pub struct MemoryContentStore {
    courses: Arc<RwLock<HashMap<Uuid, Course>>>,
    materials: Arc<RwLock<HashMap<Uuid, Material>>>,
    ratings: Arc<RwLock<HashMap<Uuid, Rating>>>,
    reviews: Arc<RwLock<HashMap<Uuid, Review>>>,
    tags: Arc<RwLock<HashMap<Uuid, Tag>>>,
}

impl std::fmt::Debug for MemoryContentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryContentStore").finish()
    }
}

impl MemoryContentStore {
    /// Create a new empty in-memory content store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn insert_course(&self, course: Course) -> ContentResult<()> {
        self.courses.write().await.insert(course.id, course);
        Ok(())
    }

    async fn get_course(&self, id: Uuid) -> ContentResult<Option<Course>> {
        Ok(self.courses.read().await.get(&id).cloned())
    }

    async fn update_course(&self, course: Course) -> ContentResult<()> {
        self.courses.write().await.insert(course.id, course);
        Ok(())
    }

    async fn delete_course(&self, id: Uuid) -> ContentResult<bool> {
        Ok(self.courses.write().await.remove(&id).is_some())
    }

    async fn insert_material(&self, material: Material) -> ContentResult<()> {
        self.materials.write().await.insert(material.id, material);
        Ok(())
    }

    async fn get_material(&self, id: Uuid) -> ContentResult<Option<Material>> {
        Ok(self.materials.read().await.get(&id).cloned())
    }

    async fn update_material(&self, material: Material) -> ContentResult<()> {
        self.materials.write().await.insert(material.id, material);
        Ok(())
    }

    async fn delete_material(&self, id: Uuid) -> ContentResult<bool> {
        Ok(self.materials.write().await.remove(&id).is_some())
    }

    async fn list_materials(&self, course_id: Uuid) -> ContentResult<Vec<Material>> {
        Ok(self
            .materials
            .read()
            .await
            .values()
            .filter(|m| m.course_id == course_id)
            .cloned()
            .collect())
    }

    async fn insert_rating(&self, rating: Rating) -> ContentResult<()> {
        self.ratings.write().await.insert(rating.id, rating);
        Ok(())
    }

    async fn get_rating(&self, id: Uuid) -> ContentResult<Option<Rating>> {
        Ok(self.ratings.read().await.get(&id).cloned())
    }

    async fn update_rating(&self, rating: Rating) -> ContentResult<()> {
        self.ratings.write().await.insert(rating.id, rating);
        Ok(())
    }

    async fn delete_rating(&self, id: Uuid) -> ContentResult<bool> {
        Ok(self.ratings.write().await.remove(&id).is_some())
    }

    async fn insert_review(&self, review: Review) -> ContentResult<()> {
        self.reviews.write().await.insert(review.id, review);
        Ok(())
    }

    async fn get_review(&self, id: Uuid) -> ContentResult<Option<Review>> {
        Ok(self.reviews.read().await.get(&id).cloned())
    }

    async fn update_review(&self, review: Review) -> ContentResult<()> {
        self.reviews.write().await.insert(review.id, review);
        Ok(())
    }

    async fn delete_review(&self, id: Uuid) -> ContentResult<bool> {
        Ok(self.reviews.write().await.remove(&id).is_some())
    }

    async fn insert_tag(&self, tag: Tag) -> ContentResult<()> {
        self.tags.write().await.insert(tag.id, tag);
        Ok(())
    }

    async fn get_tag(&self, id: Uuid) -> ContentResult<Option<Tag>> {
        Ok(self.tags.read().await.get(&id).cloned())
    }

    async fn delete_tag(&self, id: Uuid) -> ContentResult<bool> {
        Ok(self.tags.write().await.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_course_crud() {
        let store = MemoryContentStore::new();
        let course = Course::new(Uuid::now_v7(), "Algebra I");
        let id = course.id;

        store.insert_course(course.clone()).await.unwrap();
        assert!(store.get_course(id).await.unwrap().is_some());

        let mut edited = course;
        edited.title = "Algebra II".to_string();
        store.update_course(edited).await.unwrap();
        assert_eq!(
            store.get_course(id).await.unwrap().unwrap().title,
            "Algebra II"
        );

        assert!(store.delete_course(id).await.unwrap());
        assert!(!store.delete_course(id).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_materials_scopes_to_course() {
        let store = MemoryContentStore::new();
        let course_id = Uuid::now_v7();

        store
            .insert_material(Material::new(course_id, Uuid::now_v7(), "A"))
            .await
            .unwrap();
        store
            .insert_material(Material::new(course_id, Uuid::now_v7(), "B"))
            .await
            .unwrap();
        store
            .insert_material(Material::new(Uuid::now_v7(), Uuid::now_v7(), "other"))
            .await
            .unwrap();

        assert_eq!(store.list_materials(course_id).await.unwrap().len(), 2);
    }
}
