// =============================================================================
// ENUMERATE — Tous les chemins d'une forme (AllPaths)
// =============================================================================
//
// Calcule l'ensemble des chemins pointés atteignables en descendant de clé
// en clé dans les records :
//
//   { a: { c: number }, b: [ { x: 1 } ] }   →   a, a.c, b
//
// Seuls les RECORDS contribuent des segments : une séquence ou un scalaire
// termine la descente (le chemin qui y mène est émis, rien au-delà).
//
// GARANTIE : chaque chemin émis se résout avec `get`. Les clés qui ne
// peuvent pas s'écrire dans un chemin pointé (symboles, clés vides, clés
// contenant `.` ou `[`) ne sont donc pas émises, ni leur sous-arbre.
//
// L'ordre est un parcours en profondeur dans l'ordre d'insertion, mais les
// appelants ne doivent pas en dépendre.
//
// =============================================================================

use tracing::trace;

use super::shape::Shape;

/// Tous les chemins pointés atteignables par descente dans les records.
pub fn all_paths(shape: &Shape) -> Vec<String> {
    let mut paths = Vec::new();
    collect(shape, None, &mut paths);
    paths
}

fn collect(shape: &Shape, prefix: Option<&str>, paths: &mut Vec<String>) {
    let Shape::Record(record) = shape else {
        return;
    };
    for (key, field) in record {
        let Some(segment) = key.path_segment() else {
            trace!(key = %key, "all_paths: key cannot be addressed by a dotted path");
            continue;
        };
        let path = match prefix {
            Some(p) => format!("{}.{}", p, segment),
            None => segment,
        };
        paths.push(path.clone());
        collect(&field.shape, Some(&path), paths);
    }
}
