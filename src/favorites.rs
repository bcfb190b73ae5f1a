use std::fs;
use std::path::Path;
use crate::errors::FavoritesError;
use crate::models::place::Place;

/// Loads the favorite places from file. A missing file is an empty list,
/// not an error, so the store works before anything was ever saved.
///
/// # Arguments
///
/// * 'favorites_file' - path to the favorites file
pub fn load_favorites(favorites_file: &str) -> Result<Vec<Place>, FavoritesError> {
    let path = Path::new(favorites_file);
    if !path.exists() {
        return Ok(Vec::new());
    }

    let json = fs::read_to_string(path)?;
    let favorites: Vec<Place> = serde_json::from_str(&json)?;

    Ok(favorites)
}

/// Saves the favorite places to file, creating parent directories as
/// needed
///
/// # Arguments
///
/// * 'favorites_file' - path to the favorites file
/// * 'favorites' - the places to save
pub fn save_favorites(favorites_file: &str, favorites: &Vec<Place>) -> Result<(), FavoritesError> {
    if let Some(dir) = Path::new(favorites_file).parent() {
        fs::create_dir_all(dir)?;
    }

    let json = serde_json::to_string_pretty(favorites)?;
    fs::write(favorites_file, json)?;

    Ok(())
}

/// Adds a place to the favorites unless it is already there.
/// Returns true if the list changed.
///
/// # Arguments
///
/// * 'favorites_file' - path to the favorites file
/// * 'place' - the place to add
pub fn add_favorite(favorites_file: &str, place: &Place) -> Result<bool, FavoritesError> {
    let mut favorites = load_favorites(favorites_file)?;

    if favorites.iter().any(|f| f.same_location(place)) {
        return Ok(false);
    }

    favorites.push(place.clone());
    save_favorites(favorites_file, &favorites)?;

    Ok(true)
}

/// Removes a place from the favorites. Returns true if the list changed.
///
/// # Arguments
///
/// * 'favorites_file' - path to the favorites file
/// * 'place' - the place to remove
pub fn remove_favorite(favorites_file: &str, place: &Place) -> Result<bool, FavoritesError> {
    let favorites = load_favorites(favorites_file)?;

    let remaining: Vec<Place> = favorites.iter()
        .filter(|f| !f.same_location(place))
        .cloned()
        .collect();

    if remaining.len() == favorites.len() {
        return Ok(false);
    }

    save_favorites(favorites_file, &remaining)?;

    Ok(true)
}

/// Looks a favorite up by name, ignoring case
///
/// # Arguments
///
/// * 'favorites_file' - path to the favorites file
/// * 'name' - name of the place to find
pub fn find_favorite(favorites_file: &str, name: &str) -> Result<Option<Place>, FavoritesError> {
    let favorites = load_favorites(favorites_file)?;

    Ok(favorites.into_iter().find(|f| f.name.eq_ignore_ascii_case(name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(name: &str, lat: f64) -> Place {
        Place {
            name: name.to_string(),
            address: "somewhere".to_string(),
            lat,
            long: 2.0,
        }
    }

    fn store() -> (tempfile::TempDir, String) {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("favorites.json").to_str().unwrap().to_string();
        (dir, file)
    }

    #[test]
    fn missing_file_is_an_empty_list() {
        let (_dir, file) = store();
        assert!(load_favorites(&file).unwrap().is_empty());
    }

    #[test]
    fn add_and_reload_round_trip() {
        let (_dir, file) = store();

        assert!(add_favorite(&file, &place("Pic du Midi", 42.94)).unwrap());
        assert!(add_favorite(&file, &place("Atacama", -24.6)).unwrap());

        let favorites = load_favorites(&file).unwrap();
        assert_eq!(favorites.len(), 2);
        assert_eq!(favorites[0].name, "Pic du Midi");
    }

    #[test]
    fn adding_twice_changes_nothing() {
        let (_dir, file) = store();

        assert!(add_favorite(&file, &place("Pic du Midi", 42.94)).unwrap());
        assert!(!add_favorite(&file, &place("Pic du Midi", 42.94)).unwrap());

        assert_eq!(load_favorites(&file).unwrap().len(), 1);
    }

    #[test]
    fn remove_only_touches_the_matching_place() {
        let (_dir, file) = store();
        add_favorite(&file, &place("Pic du Midi", 42.94)).unwrap();
        add_favorite(&file, &place("Atacama", -24.6)).unwrap();

        assert!(remove_favorite(&file, &place("Atacama", -24.6)).unwrap());
        assert!(!remove_favorite(&file, &place("Atacama", -24.6)).unwrap());

        let favorites = load_favorites(&file).unwrap();
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].name, "Pic du Midi");
    }

    #[test]
    fn find_ignores_case() {
        let (_dir, file) = store();
        add_favorite(&file, &place("Pic du Midi", 42.94)).unwrap();

        assert!(find_favorite(&file, "pic du midi").unwrap().is_some());
        assert!(find_favorite(&file, "atacama").unwrap().is_none());
    }
}
