use serde::{Deserialize, Serialize};

/// Columns of a business listing, in export order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Phone,
    Address,
    City,
    State,
    Zip,
    Revenue,
    TimeInBusiness,
    Headcount,
}

impl Field {
    pub const ALL: [Field; 9] = [
        Field::Name,
        Field::Phone,
        Field::Address,
        Field::City,
        Field::State,
        Field::Zip,
        Field::Revenue,
        Field::TimeInBusiness,
        Field::Headcount,
    ];

    /// Column name as it appears in the source dataset and in exports.
    pub fn column(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Phone => "phone",
            Field::Address => "address",
            Field::City => "city",
            Field::State => "state",
            Field::Zip => "zip",
            Field::Revenue => "revenue",
            Field::TimeInBusiness => "time_in_business",
            Field::Headcount => "headcount",
        }
    }

    pub fn from_column(name: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.column() == name)
    }
}

/// One business listing. Every attribute is nullable; `None` is the single
/// missing-value marker once a record has gone through the normalizer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub revenue: Option<String>,
    pub time_in_business: Option<String>,
    pub headcount: Option<String>,
}

impl Record {
    pub fn get(&self, field: Field) -> Option<&str> {
        self.slot(field).as_deref()
    }

    pub fn set(&mut self, field: Field, value: Option<String>) {
        *self.slot_mut(field) = value;
    }

    /// Applies `f` to every field in place.
    pub fn map_fields(&mut self, mut f: impl FnMut(Field, Option<String>) -> Option<String>) {
        for field in Field::ALL {
            let slot = self.slot_mut(field);
            *slot = f(field, slot.take());
        }
    }

    fn slot(&self, field: Field) -> &Option<String> {
        match field {
            Field::Name => &self.name,
            Field::Phone => &self.phone,
            Field::Address => &self.address,
            Field::City => &self.city,
            Field::State => &self.state,
            Field::Zip => &self.zip,
            Field::Revenue => &self.revenue,
            Field::TimeInBusiness => &self.time_in_business,
            Field::Headcount => &self.headcount,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Name => &mut self.name,
            Field::Phone => &mut self.phone,
            Field::Address => &mut self.address,
            Field::City => &mut self.city,
            Field::State => &mut self.state,
            Field::Zip => &mut self.zip,
            Field::Revenue => &mut self.revenue,
            Field::TimeInBusiness => &mut self.time_in_business,
            Field::Headcount => &mut self.headcount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_names_round_trip() {
        for field in Field::ALL {
            assert_eq!(Field::from_column(field.column()), Some(field));
        }
        assert_eq!(Field::from_column("employees"), None);
    }

    #[test]
    fn map_fields_visits_every_column() {
        let mut record = Record::default();
        record.map_fields(|field, _| Some(field.column().to_string()));
        assert_eq!(record.get(Field::TimeInBusiness), Some("time_in_business"));
        assert_eq!(record.zip.as_deref(), Some("zip"));
    }
}
