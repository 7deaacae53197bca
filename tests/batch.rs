mod common;

#[cfg(test)]
mod tests {
    use crate::common::{RecordingPrepared, init_logs};
    use stencil::{BindArguments, BindingMismatch, StatementConfig, Value};

    #[test]
    fn named_rows() {
        init_logs();
        let config = StatementConfig::default();
        let mut batch = config.create_batch("insert into <table> (id, name) values (:id, :name)");
        batch.define("table", "users");
        batch.bind_named("id", 1).bind_named("name", "Alice");
        batch.add().unwrap();
        batch
            .add_named_row([
                ("id", Value::Int32(Some(2))),
                ("name", Value::Varchar(Some("Bob".into()))),
            ])
            .unwrap();
        assert_eq!(batch.len(), 2);
        let rendered = batch.render().unwrap();
        assert_eq!(rendered.sql(), "insert into users (id, name) values (?, ?)");
        let rows: Vec<Vec<Value>> = rendered
            .rows()
            .iter()
            .map(|row| row.iter().map(|v| v.value.clone()).collect())
            .collect();
        assert_eq!(
            rows,
            vec![
                vec![Value::Int32(Some(1)), Value::Varchar(Some("Alice".into()))],
                vec![Value::Int32(Some(2)), Value::Varchar(Some("Bob".into()))],
            ]
        );
    }

    #[test]
    fn positional_rows() {
        init_logs();
        let config = StatementConfig::default();
        let mut batch = config.create_batch("insert into t values (?, ?)");
        for i in 0..3_i64 {
            batch.add_positional_row([i, i * 10]).unwrap();
        }
        let rendered = batch.render().unwrap();
        assert_eq!(rendered.rows().len(), 3);
        let mut prepared = RecordingPrepared::default();
        rendered
            .bind_row_to(2, &mut prepared, config.registry())
            .unwrap();
        assert_eq!(
            prepared.values(),
            vec![Value::Int64(Some(2)), Value::Int64(Some(20))]
        );
        rendered
            .bind_row_to(0, &mut prepared, config.registry())
            .unwrap();
        assert_eq!(
            prepared.values(),
            vec![Value::Int64(Some(0)), Value::Int64(Some(0))]
        );
        assert!(
            rendered
                .bind_row_to(3, &mut prepared, config.registry())
                .is_err()
        );
    }

    #[test]
    fn empty_row_is_rejected() {
        init_logs();
        let config = StatementConfig::default();
        let mut batch = config.create_batch("insert into t values (:a)");
        assert!(batch.add().is_err());
        assert!(batch.is_empty());
    }

    #[test]
    fn failing_row_is_named() {
        init_logs();
        let config = StatementConfig::default();
        let mut batch = config.create_batch("insert into t values (:a, :b)");
        batch.add_named_row([("a", 1), ("b", 2)]).unwrap();
        batch.add_named_row([("a", 3)]).unwrap();
        let error = batch.render().unwrap_err();
        assert_eq!(
            *error.downcast_ref::<BindingMismatch>().unwrap(),
            BindingMismatch::MissingNamed(vec!["b".into()])
        );
        assert!(format!("{:#}", error).starts_with("Cannot resolve row 1 of the batch"));
    }

    #[test]
    fn empty_batch() {
        init_logs();
        let config = StatementConfig::default();
        let batch = config.create_batch("insert into t values (:a)");
        let rendered = batch.render().unwrap();
        assert!(rendered.rows().is_empty());
        assert_eq!(rendered.sql(), "insert into t values (?)");
    }
}
