//! Integration tests for the Importer

#[cfg(test)]
mod tests {
    use crate::{parse_persons, Field, Importer, ImporterConfig, Outcome};
    use urzednicy_domain::{
        DataValue, EntityId, EntityStore, ItemDocument, ItemLookup, Snak, SnakValue, Statement,
    };
    use urzednicy_sdk::InMemoryStore;

    const REGISTER: &str = r#"<persons>
  <person>
    <name>Jan</name>
    <surname>Tęczyński</surname>
    <coat_of_arms>Topór</coat_of_arms>
    <date_of_birth>przed 1410</date_of_birth>
    <date_of_death>ok. 1470</date_of_death>
    <place_of_birth><place>Tęczyn</place><prng>98765</prng></place_of_birth>
    <stated_as lang="la">Johannes de Tanczin</stated_as>
    <positions>
      <position>
        <office>kasztelan wojnicki</office>
        <start_date>1410</start_date>
        <end_date>1415</end_date>
      </position>
      <position><office>wojewoda krakowski</office><date>XV w.</date></position>
    </positions>
  </person>
  <person>
    <name>Mikołaj Jan</name>
    <surname>Tęczyński</surname>
    <coat_of_arms>herb nieznany</coat_of_arms>
    <floruit>garbage</floruit>
    <positions>
      <position><office>kasztelan wojnicki</office></position>
    </positions>
  </person>
</persons>"#;

    fn id(s: &str) -> EntityId {
        EntityId::from_string(s).unwrap()
    }

    fn seeded_store() -> InMemoryStore {
        let mut store = InMemoryStore::new();
        let mut place = ItemDocument::new();
        place.set_label("pl", "Tęczyn");
        place.add_statement(Statement::new(Snak::string(&id("P274"), "98765")));
        store.insert(id("Q500"), place);
        store
    }

    fn labelled(store: &InMemoryStore, label: &str) -> Vec<EntityId> {
        store
            .items()
            .iter()
            .filter(|(_, doc)| doc.label("pl") == Some(label))
            .map(|(id, _)| id.clone())
            .collect()
    }

    #[test]
    fn test_full_import_flow() {
        let records = parse_persons(REGISTER).unwrap();
        let mut importer = Importer::new(seeded_store(), ImporterConfig::default()).unwrap();

        let report = importer.run(&records);
        assert_eq!(report.created(), 2);
        assert_eq!(report.failed(), 0);

        let store = importer.into_store();
        let Outcome::Created(jan_id) = &report.records[0].outcome else {
            panic!("Expected created, got {:?}", report.records[0].outcome);
        };
        let jan = store.get(jan_id).unwrap();
        let p = ImporterConfig::default().properties;

        assert_eq!(jan.label("pl"), Some("Jan Tęczyński"));
        assert_eq!(jan.label("en"), Some("Jan Tęczyński"));
        assert_eq!(
            jan.description("pl"),
            Some("(przed 1410-ok. 1470) kasztelan wojnicki, wojewoda krakowski")
        );
        assert_eq!(jan.aliases["la"], vec!["Johannes de Tanczin".to_string()]);

        // Death "ok." becomes an unknown value with a circa qualifier
        let death = jan.statements_for(&p.date_of_death).next().unwrap();
        assert_eq!(death.main_snak.value, SnakValue::SomeValue);
        assert_eq!(death.qualifiers_for(&p.circa).count(), 1);

        // Birth "przed" keeps the value and adds a before qualifier
        let birth = jan.statements_for(&p.date_of_birth).next().unwrap();
        assert!(birth.main_snak.data_value().is_some());
        assert_eq!(birth.qualifiers_for(&p.before).count(), 1);

        let place = jan.statements_for(&p.place_of_birth).next().unwrap();
        assert_eq!(place.main_snak.data_value(), Some(&DataValue::Item(id("Q500"))));

        let positions: Vec<_> = jan.statements_for(&p.position_held).collect();
        assert_eq!(positions.len(), 2);
        assert_eq!(positions[0].qualifiers.len(), 2);
        assert_eq!(positions[0].qualifiers_for(&p.point_in_time).count(), 0);
        assert_eq!(positions[0].references.len(), 2);
        assert_eq!(positions[1].qualifiers_for(&p.point_in_time).count(), 1);

        let stated_as = jan.statements_for(&p.stated_as).next().unwrap();
        assert_eq!(stated_as.references.len(), 1);
    }

    #[test]
    fn test_related_items_are_created_once() {
        let records = parse_persons(REGISTER).unwrap();
        let mut importer = Importer::new(seeded_store(), ImporterConfig::default()).unwrap();
        importer.run(&records);
        let store = importer.into_store();

        // Shared surname, given name and office resolve to one item each
        assert_eq!(labelled(&store, "Tęczyński").len(), 1);
        assert_eq!(labelled(&store, "Jan").len(), 1);
        assert_eq!(labelled(&store, "kasztelan wojnicki").len(), 1);
        assert_eq!(labelled(&store, "Mikołaj").len(), 1);

        let office = store.get(&labelled(&store, "kasztelan wojnicki")[0]).unwrap();
        assert_eq!(office.description("pl"), Some("urząd"));
        assert_eq!(office.description("en"), Some("position"));

        let coat = store.get(&labelled(&store, "Topór")[0]).unwrap();
        assert_eq!(coat.description("pl"), Some("herb szlachecki"));
        assert!(labelled(&store, "herb nieznany").is_empty());
    }

    #[test]
    fn test_skipped_fields_are_reported() {
        let records = parse_persons(REGISTER).unwrap();
        let mut importer = Importer::new(seeded_store(), ImporterConfig::default()).unwrap();
        let report = importer.run(&records);

        let mikolaj = &report.records[1];
        let fields: Vec<Field> = mikolaj.skipped.iter().map(|s| s.field).collect();
        assert_eq!(fields, vec![Field::CoatOfArms, Field::Floruit]);
        assert_eq!(report.skipped_fields(), 2);
    }

    #[test]
    fn test_second_run_updates_existing_people() {
        let records = parse_persons(REGISTER).unwrap();
        let mut importer = Importer::new(seeded_store(), ImporterConfig::default()).unwrap();
        importer.run(&records);
        let store = importer.into_store();
        let items_after_first_run = store.items().len();

        let mut importer = Importer::new(store, ImporterConfig::default()).unwrap();
        let report = importer.run(&records);
        assert_eq!(report.updated(), 2);
        assert_eq!(report.created(), 0);

        let store = importer.into_store();
        assert_eq!(store.items().len(), items_after_first_run);

        // Statements are not duplicated on update
        let Outcome::Updated(jan_id) = &report.records[0].outcome else {
            panic!("Expected updated");
        };
        let positions = store
            .get(jan_id)
            .unwrap()
            .statements_for(&ImporterConfig::default().properties.position_held)
            .count();
        assert_eq!(positions, 2);
    }

    #[test]
    fn test_limit() {
        let records = parse_persons(REGISTER).unwrap();
        let config = ImporterConfig {
            limit: Some(1),
            ..ImporterConfig::default()
        };
        let mut importer = Importer::new(seeded_store(), config).unwrap();
        let report = importer.run(&records);
        assert_eq!(report.records.len(), 1);
    }

    #[test]
    fn test_record_without_label_fails_alone() {
        let xml = "<persons>\
            <person><floruit>1450</floruit></person>\
            <person><name>Piotr</name></person>\
            </persons>";
        let records = parse_persons(xml).unwrap();
        let mut importer = Importer::new(InMemoryStore::new(), ImporterConfig::default()).unwrap();

        let report = importer.run(&records);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.created(), 1);
        assert!(matches!(report.records[0].outcome, Outcome::Failed(_)));
    }

    #[test]
    fn test_person_without_description_is_not_merged_into_name_item() {
        let xml = "<persons><person><name>Piotr</name></person></persons>";
        let records = parse_persons(xml).unwrap();
        let classes = ImporterConfig::default().classes;
        let p = ImporterConfig::default().properties;

        let mut importer = Importer::new(InMemoryStore::new(), ImporterConfig::default()).unwrap();
        let report = importer.run(&records);
        let Outcome::Created(person_id) = report.records[0].outcome.clone() else {
            panic!("Expected created, got {:?}", report.records[0].outcome);
        };

        let store = importer.into_store();
        let piotr = labelled(&store, "Piotr");
        assert_eq!(piotr.len(), 2);

        let name_id = piotr.iter().find(|id| **id != person_id).unwrap();
        let name = store.get(name_id).unwrap();
        assert_eq!(name.statements_for(&p.instance_of).count(), 1);
        assert_eq!(
            name.statements_for(&p.instance_of).next().unwrap().main_snak.data_value(),
            Some(&DataValue::Item(classes.given_name.clone()))
        );

        // A second run finds the person, not the given name
        let mut importer = Importer::new(store, ImporterConfig::default()).unwrap();
        let report = importer.run(&records);
        assert_eq!(report.records[0].outcome, Outcome::Updated(person_id));
    }

    /// Store whose writes fail for one label
    struct FlakyStore {
        inner: InMemoryStore,
        poisoned: &'static str,
    }

    impl EntityStore for FlakyStore {
        type Error = String;

        fn find(&self, lookup: &ItemLookup) -> Result<Option<EntityId>, String> {
            self.inner.find(lookup).map_err(|e| e.to_string())
        }

        fn create(&mut self, document: &ItemDocument) -> Result<EntityId, String> {
            if document.label("pl") == Some(self.poisoned) {
                return Err("ratelimited".to_string());
            }
            self.inner.create(document).map_err(|e| e.to_string())
        }

        fn update(&mut self, id: &EntityId, document: &ItemDocument) -> Result<(), String> {
            self.inner.update(id, document).map_err(|e| e.to_string())
        }
    }

    #[test]
    fn test_store_failure_is_isolated_to_record() {
        let records = parse_persons(REGISTER).unwrap();
        let store = FlakyStore {
            inner: seeded_store(),
            poisoned: "Topór",
        };
        let mut importer = Importer::new(store, ImporterConfig::default()).unwrap();

        let report = importer.run(&records);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.created(), 1);
        match &report.records[0].outcome {
            Outcome::Failed(reason) => assert!(reason.contains("ratelimited")),
            other => panic!("Expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = ImporterConfig {
            languages: Vec::new(),
            ..ImporterConfig::default()
        };
        assert!(Importer::new(InMemoryStore::new(), config).is_err());
    }
}
