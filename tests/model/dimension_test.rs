#[cfg(test)]
mod tests {
    use crosscut::model::{
        aggregate_item, Catalog, Dimension, DimensionItem, DimensionMapping, AGGREGATE_ITEM_ID,
    };

    fn country_dimension() -> Dimension {
        Dimension::new(
            "country",
            "Country",
            vec![
                DimensionItem::new("germany", "Germany").with_mappings(vec![
                    DimensionMapping::new("germany_region", "region", "europe"),
                ]),
                DimensionItem::new("poland", "Poland").with_mappings(vec![
                    DimensionMapping::new("poland_region", "region", "europe"),
                ]),
            ],
        )
    }

    #[test]
    fn test_dimension_construction() {
        let dimension = country_dimension();
        assert_eq!(dimension.id, "country");
        assert_eq!(dimension.name, "Country");
        assert_eq!(dimension.items.len(), 2);
        assert_eq!(dimension.owner_id, -1);
        assert!(dimension.model_ids.is_empty());
    }

    #[test]
    fn test_dimension_with_model_ids() {
        let dimension = country_dimension().with_model_ids(vec![7, 11]);
        assert_eq!(dimension.model_ids, vec![7, 11]);
    }

    #[test]
    fn test_item_lookup() {
        let dimension = country_dimension();
        assert_eq!(
            dimension.item("poland").map(|item| item.name.as_str()),
            Some("Poland")
        );
        assert_eq!(dimension.item("france"), None);
    }

    #[test]
    fn test_item_ids_keep_catalog_order() {
        let dimension = country_dimension();
        assert_eq!(dimension.item_ids(), vec!["germany", "poland"]);
    }

    #[test]
    fn test_mapping_to_other_dimension() {
        let dimension = country_dimension();
        let germany = dimension.item("germany").unwrap();
        let mapping = germany.mapping_to("region").unwrap();
        assert_eq!(mapping.to_item_id, "europe");
        assert_eq!(germany.mapping_to("planet"), None);
    }

    #[test]
    fn test_aggregate_item_sentinel() {
        let item = aggregate_item();
        assert_eq!(item.id, AGGREGATE_ITEM_ID);
        assert_eq!(item.name, "Aggregate");
        assert!(item.mappings.is_empty());
    }

    #[test]
    fn test_catalog_replaces_duplicate_ids() {
        let catalog = Catalog::new(vec![
            country_dimension(),
            Dimension::new("country", "Country renamed", vec![]),
        ]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(
            catalog.get("country").map(|d| d.name.as_str()),
            Some("Country renamed")
        );
    }

    #[test]
    fn test_dimension_serde_round_trip() {
        let dimension = country_dimension();
        let json = serde_json::to_string(&dimension).unwrap();
        let back: Dimension = serde_json::from_str(&json).unwrap();
        assert_eq!(back, dimension);
    }

    #[test]
    fn test_cmp_by_id_orders_lexically() {
        let mut dimensions = vec![
            country_dimension(),
            Dimension::new("ads", "Ads", vec![]),
            Dimension::new("region", "Region", vec![]),
        ];
        dimensions.sort_by(Dimension::cmp_by_id);
        let ids: Vec<&str> = dimensions.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["ads", "country", "region"]);
    }
}
