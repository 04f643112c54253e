//! Subjects service
//!
//! Study subjects with nested folders and materials. A material lives
//! in exactly one container at a time: its subject's root list or one
//! folder of that subject. Deleting a subject discards everything it
//! contains; the whole subject tree is persisted as one collection
//! entry, so every structural edit lands atomically.

use crate::config::collections;
use crate::error::Result;
use crate::models::{Folder, Material, NewMaterial, Subject};
use crate::store::Store;
use chrono::Utc;

/// Count of materials across the subject root and all folders.
pub fn total_materials(subject: &Subject) -> usize {
    subject.materials.len()
        + subject
            .folders
            .iter()
            .map(|f| f.materials.len())
            .sum::<usize>()
}

#[derive(Clone)]
pub struct SubjectsService {
    store: Store,
}

impl SubjectsService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn create_subject(&self, name: &str) -> Result<Subject> {
        crate::models::required(name, "subject name")?;

        let id = self.store.next_id(collections::SUBJECTS).await?;
        let subject = Subject {
            id,
            name: name.trim().to_string(),
            materials: Vec::new(),
            folders: Vec::new(),
        };

        let stored = subject.clone();
        self.store
            .mutate::<Subject, _, _>(collections::SUBJECTS, move |subjects| subjects.push(stored))
            .await?;

        tracing::info!("Created subject {}: {}", subject.id, subject.name);
        Ok(subject)
    }

    pub async fn list_subjects(&self) -> Result<Vec<Subject>> {
        self.store.load_or_default(collections::SUBJECTS).await
    }

    pub async fn get_subject(&self, id: u64) -> Result<Option<Subject>> {
        let subjects = self.list_subjects().await?;
        Ok(subjects.into_iter().find(|s| s.id == id))
    }

    /// Remove a subject along with every folder and material inside it.
    pub async fn delete_subject(&self, id: u64) -> Result<()> {
        self.store
            .mutate::<Subject, _, _>(collections::SUBJECTS, move |subjects| {
                subjects.retain(|s| s.id != id);
            })
            .await?;

        tracing::info!("Deleted subject {}", id);
        Ok(())
    }

    /// Add a material to a subject's root list, or to one of its
    /// folders when `folder_id` is given. A missing subject or folder
    /// is a silent no-op.
    pub async fn add_material(
        &self,
        subject_id: u64,
        folder_id: Option<u64>,
        new: NewMaterial,
    ) -> Result<Option<Material>> {
        new.validate()?;

        let id = self.store.next_id(collections::SUBJECT_MATERIALS).await?;
        let material = Material {
            id,
            name: new.name,
            kind: new.kind,
            size: new.size,
            data: new.data,
            date_added: Utc::now(),
        };

        self.store
            .mutate::<Subject, _, _>(collections::SUBJECTS, move |subjects| {
                let subject = subjects.iter_mut().find(|s| s.id == subject_id)?;
                let container = match folder_id {
                    None => &mut subject.materials,
                    Some(fid) => {
                        &mut subject.folders.iter_mut().find(|f| f.id == fid)?.materials
                    }
                };
                container.push(material.clone());
                Some(material)
            })
            .await
    }

    /// Remove a material from the given container of a subject. Missing
    /// subject, folder or material are silent no-ops.
    pub async fn delete_material(
        &self,
        subject_id: u64,
        folder_id: Option<u64>,
        material_id: u64,
    ) -> Result<()> {
        self.store
            .mutate::<Subject, _, _>(collections::SUBJECTS, move |subjects| {
                let subject = subjects.iter_mut().find(|s| s.id == subject_id)?;
                let container = match folder_id {
                    None => &mut subject.materials,
                    Some(fid) => {
                        &mut subject.folders.iter_mut().find(|f| f.id == fid)?.materials
                    }
                };
                container.retain(|m| m.id != material_id);
                Some(())
            })
            .await?;
        Ok(())
    }

    /// Create a folder inside a subject. A missing subject is a silent
    /// no-op.
    pub async fn create_folder(&self, subject_id: u64, name: &str) -> Result<Option<Folder>> {
        crate::models::required(name, "folder name")?;

        let id = self.store.next_id(collections::SUBJECT_FOLDERS).await?;
        let folder = Folder {
            id,
            name: name.trim().to_string(),
            materials: Vec::new(),
            date_created: Utc::now(),
        };

        self.store
            .mutate::<Subject, _, _>(collections::SUBJECTS, move |subjects| {
                let subject = subjects.iter_mut().find(|s| s.id == subject_id)?;
                subject.folders.push(folder.clone());
                Some(folder)
            })
            .await
    }

    pub async fn rename_folder(
        &self,
        subject_id: u64,
        folder_id: u64,
        name: &str,
    ) -> Result<Option<Folder>> {
        crate::models::required(name, "folder name")?;

        let name = name.trim().to_string();
        self.store
            .mutate::<Subject, _, _>(collections::SUBJECTS, move |subjects| {
                let subject = subjects.iter_mut().find(|s| s.id == subject_id)?;
                let folder = subject.folders.iter_mut().find(|f| f.id == folder_id)?;
                folder.name = name;
                Some(folder.clone())
            })
            .await
    }

    /// Remove a folder and discard the materials inside it.
    pub async fn delete_folder(&self, subject_id: u64, folder_id: u64) -> Result<()> {
        self.store
            .mutate::<Subject, _, _>(collections::SUBJECTS, move |subjects| {
                let subject = subjects.iter_mut().find(|s| s.id == subject_id)?;
                subject.folders.retain(|f| f.id != folder_id);
                Some(())
            })
            .await?;
        Ok(())
    }

    /// Move a material from its current container (`from_folder_id`
    /// None means the subject root) into the target folder. The target
    /// is verified before anything is removed, so a failed move leaves
    /// the material where it was. Returns whether the move happened.
    pub async fn move_material(
        &self,
        subject_id: u64,
        from_folder_id: Option<u64>,
        material_id: u64,
        to_folder_id: u64,
    ) -> Result<bool> {
        self.store
            .mutate::<Subject, _, _>(collections::SUBJECTS, move |subjects| {
                let subject = match subjects.iter_mut().find(|s| s.id == subject_id) {
                    Some(s) => s,
                    None => return false,
                };
                let target_index = match subject.folders.iter().position(|f| f.id == to_folder_id)
                {
                    Some(index) => index,
                    None => return false,
                };

                let source = match from_folder_id {
                    None => &mut subject.materials,
                    Some(fid) => match subject.folders.iter_mut().find(|f| f.id == fid) {
                        Some(f) => &mut f.materials,
                        None => return false,
                    },
                };
                let material = match source.iter().position(|m| m.id == material_id) {
                    Some(index) => source.remove(index),
                    None => return false,
                };

                subject.folders[target_index].materials.push(material);
                true
            })
            .await
    }

    /// Case-insensitive material name search across a subject's root
    /// list and all of its folders.
    pub async fn search_materials(&self, subject_id: u64, query: &str) -> Result<Vec<Material>> {
        let subject = match self.get_subject(subject_id).await? {
            Some(s) => s,
            None => return Ok(Vec::new()),
        };

        let needle = query.trim().to_lowercase();
        let mut materials = subject.materials;
        for folder in subject.folders {
            materials.extend(folder.materials);
        }
        if needle.is_empty() {
            return Ok(materials);
        }
        Ok(materials
            .into_iter()
            .filter(|m| m.name.to_lowercase().contains(&needle))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MaterialType;
    use crate::store::create_test_pool;

    async fn create_test_service() -> SubjectsService {
        SubjectsService::new(Store::new(create_test_pool().await))
    }

    fn new_material(name: &str) -> NewMaterial {
        NewMaterial {
            name: name.to_string(),
            kind: MaterialType::Pdf,
            size: 1024,
            data: "data:application/pdf;base64,AAAA".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_subject() {
        let service = create_test_service().await;

        let subject = service.create_subject("  Physics ").await.unwrap();
        assert_eq!(subject.name, "Physics");

        let loaded = service.get_subject(subject.id).await.unwrap().unwrap();
        assert_eq!(loaded, subject);
        assert!(service.get_subject(999).await.unwrap().is_none());

        assert!(service.create_subject("  ").await.unwrap_err().is_validation());
    }

    #[tokio::test]
    async fn test_add_material_to_root_and_folder() {
        let service = create_test_service().await;

        let subject = service.create_subject("Physics").await.unwrap();
        let folder = service
            .create_folder(subject.id, "Mechanics")
            .await
            .unwrap()
            .unwrap();

        service
            .add_material(subject.id, None, new_material("syllabus"))
            .await
            .unwrap()
            .unwrap();
        service
            .add_material(subject.id, Some(folder.id), new_material("lecture 1"))
            .await
            .unwrap()
            .unwrap();

        let loaded = service.get_subject(subject.id).await.unwrap().unwrap();
        assert_eq!(loaded.materials.len(), 1);
        assert_eq!(loaded.folders[0].materials.len(), 1);
        assert_eq!(total_materials(&loaded), 2);

        // Missing subject or folder is a no-op
        assert!(service
            .add_material(999, None, new_material("x"))
            .await
            .unwrap()
            .is_none());
        assert!(service
            .add_material(subject.id, Some(999), new_material("x"))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_delete_subject_cascades() {
        let service = create_test_service().await;

        let subject = service.create_subject("History").await.unwrap();
        let a = service.create_folder(subject.id, "A").await.unwrap().unwrap();
        let b = service.create_folder(subject.id, "B").await.unwrap().unwrap();

        service
            .add_material(subject.id, None, new_material("root"))
            .await
            .unwrap();
        for folder in [&a, &b] {
            for n in 0..3 {
                service
                    .add_material(subject.id, Some(folder.id), new_material(&format!("m{}", n)))
                    .await
                    .unwrap();
            }
        }

        let loaded = service.get_subject(subject.id).await.unwrap().unwrap();
        assert_eq!(total_materials(&loaded), 7);

        service.delete_subject(subject.id).await.unwrap();
        assert!(service.list_subjects().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_folder_rename_and_delete_discards_contents() {
        let service = create_test_service().await;

        let subject = service.create_subject("Math").await.unwrap();
        let folder = service
            .create_folder(subject.id, "Algbera")
            .await
            .unwrap()
            .unwrap();

        let renamed = service
            .rename_folder(subject.id, folder.id, "Algebra")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(renamed.name, "Algebra");

        service
            .add_material(subject.id, Some(folder.id), new_material("worksheet"))
            .await
            .unwrap();
        service.delete_folder(subject.id, folder.id).await.unwrap();

        let loaded = service.get_subject(subject.id).await.unwrap().unwrap();
        assert!(loaded.folders.is_empty());
        assert_eq!(total_materials(&loaded), 0);
    }

    #[tokio::test]
    async fn test_move_material_conserves_count() {
        let service = create_test_service().await;

        let subject = service.create_subject("Chemistry").await.unwrap();
        let folder = service
            .create_folder(subject.id, "Labs")
            .await
            .unwrap()
            .unwrap();
        let material = service
            .add_material(subject.id, None, new_material("lab 1"))
            .await
            .unwrap()
            .unwrap();

        let moved = service
            .move_material(subject.id, None, material.id, folder.id)
            .await
            .unwrap();
        assert!(moved);

        let loaded = service.get_subject(subject.id).await.unwrap().unwrap();
        assert!(loaded.materials.is_empty());
        assert_eq!(loaded.folders[0].materials[0].id, material.id);
        assert_eq!(total_materials(&loaded), 1);
    }

    #[tokio::test]
    async fn test_move_material_between_folders() {
        let service = create_test_service().await;

        let subject = service.create_subject("Chemistry").await.unwrap();
        let from = service.create_folder(subject.id, "From").await.unwrap().unwrap();
        let to = service.create_folder(subject.id, "To").await.unwrap().unwrap();
        let material = service
            .add_material(subject.id, Some(from.id), new_material("notes"))
            .await
            .unwrap()
            .unwrap();

        assert!(service
            .move_material(subject.id, Some(from.id), material.id, to.id)
            .await
            .unwrap());

        let loaded = service.get_subject(subject.id).await.unwrap().unwrap();
        let from_loaded = loaded.folders.iter().find(|f| f.id == from.id).unwrap();
        let to_loaded = loaded.folders.iter().find(|f| f.id == to.id).unwrap();
        assert!(from_loaded.materials.is_empty());
        assert_eq!(to_loaded.materials.len(), 1);
        assert_eq!(total_materials(&loaded), 1);
    }

    #[tokio::test]
    async fn test_move_to_missing_target_leaves_material_in_place() {
        let service = create_test_service().await;

        let subject = service.create_subject("Chemistry").await.unwrap();
        let material = service
            .add_material(subject.id, None, new_material("lab 1"))
            .await
            .unwrap()
            .unwrap();

        let moved = service
            .move_material(subject.id, None, material.id, 999)
            .await
            .unwrap();
        assert!(!moved);

        let loaded = service.get_subject(subject.id).await.unwrap().unwrap();
        assert_eq!(loaded.materials.len(), 1);
        assert_eq!(total_materials(&loaded), 1);
    }

    #[tokio::test]
    async fn test_delete_material_from_folder() {
        let service = create_test_service().await;

        let subject = service.create_subject("Bio").await.unwrap();
        let folder = service.create_folder(subject.id, "Cells").await.unwrap().unwrap();
        let material = service
            .add_material(subject.id, Some(folder.id), new_material("diagram"))
            .await
            .unwrap()
            .unwrap();

        service
            .delete_material(subject.id, Some(folder.id), material.id)
            .await
            .unwrap();

        let loaded = service.get_subject(subject.id).await.unwrap().unwrap();
        assert_eq!(total_materials(&loaded), 0);
    }

    #[tokio::test]
    async fn test_search_materials_across_containers() {
        let service = create_test_service().await;

        let subject = service.create_subject("Physics").await.unwrap();
        let folder = service.create_folder(subject.id, "Waves").await.unwrap().unwrap();
        service
            .add_material(subject.id, None, new_material("Intro Lecture"))
            .await
            .unwrap();
        service
            .add_material(subject.id, Some(folder.id), new_material("lecture on sound"))
            .await
            .unwrap();
        service
            .add_material(subject.id, Some(folder.id), new_material("problem set"))
            .await
            .unwrap();

        let hits = service.search_materials(subject.id, "LECTURE").await.unwrap();
        assert_eq!(hits.len(), 2);

        let all = service.search_materials(subject.id, "  ").await.unwrap();
        assert_eq!(all.len(), 3);

        assert!(service.search_materials(999, "x").await.unwrap().is_empty());
    }
}
