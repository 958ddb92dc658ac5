// =============================================================================
// CONFIG — Réglages du renommage de clés
// =============================================================================
//
// Le renommage de clés (MapKeys, MapKeysDeep et dérivés de casse) a deux
// comportements qu'on laisse au choix de l'appelant :
//
//   1. COLLISION : deux clés d'origine distinctes qui donnent la même
//      nouvelle clé. `camelCase` et `camel_case` deviennent tous deux
//      `camel-case` en kebab. Qui survit ?
//
//   2. RÉSULTAT NON-CLÉ : la règle rend autre chose qu'une clé
//      (un type `number`, un record...). On supprime l'entrée, ou on garde
//      la clé d'origine ?
//
// =============================================================================

/// Politique de résolution des collisions de clés après renommage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionPolicy {
    /// L'entrée la plus récente (dans l'ordre d'insertion) remplace la
    /// valeur ; la clé garde la position de sa première apparition.
    #[default]
    LastWriteWins,
    /// La première entrée survit, les suivantes sont ignorées.
    FirstWriteWins,
}

/// Configuration du Deep Key Mapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapperConfig {
    pub collision: CollisionPolicy,
    /// Si `true`, une entrée dont la nouvelle clé n'est pas une clé de
    /// propriété est supprimée. Sinon elle garde sa clé d'origine.
    pub drop_non_key_results: bool,
}

impl Default for MapperConfig {
    fn default() -> Self {
        MapperConfig {
            collision: CollisionPolicy::LastWriteWins,
            drop_non_key_results: true,
        }
    }
}

impl MapperConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collision(mut self, policy: CollisionPolicy) -> Self {
        self.collision = policy;
        self
    }

    pub fn drop_non_key_results(mut self, drop: bool) -> Self {
        self.drop_non_key_results = drop;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let c = MapperConfig::default();
        assert_eq!(c.collision, CollisionPolicy::LastWriteWins);
        assert!(c.drop_non_key_results);
    }

    #[test]
    fn test_builder() {
        let c = MapperConfig::new()
            .collision(CollisionPolicy::FirstWriteWins)
            .drop_non_key_results(false);
        assert_eq!(c.collision, CollisionPolicy::FirstWriteWins);
        assert!(!c.drop_non_key_results);
    }
}
