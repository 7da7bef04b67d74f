/*!
The persistence wire format, as serde impls.

A [`RawDate`] serializes as the flat tuple
`(calendar, modifier, quality, dateval, text, sortval, newyear)`:
the leading three are numeric codes, `dateval` is a flat sequence of 4 or
8 elements (three integers and a boolean slash flag per endpoint), and
`newyear` is either a small integer code or a `[month, day]` pair.
Deserialization also accepts the legacy six-element tuple that predates
the `newyear` field, defaulting it to 1 January.

[`Date`] itself serializes through its raw form, so a date can go
straight into any serde format.
*/

use ::serde::{
    de::{self, SeqAccess, Visitor},
    ser::{SerializeSeq, Serializer},
    Deserialize, Deserializer, Serialize,
};

use crate::date::{Date, DateVal, DateValue, NewYear, RawDate};

impl Serialize for DateValue {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        fn endpoint<S: Serializer>(
            seq: &mut S::SerializeSeq,
            v: &DateVal,
        ) -> Result<(), S::Error> {
            seq.serialize_element(&v.day)?;
            seq.serialize_element(&v.month)?;
            seq.serialize_element(&v.year)?;
            seq.serialize_element(&v.slash)
        }
        match *self {
            DateValue::Simple(ref v) => {
                let mut seq = serializer.serialize_seq(Some(4))?;
                endpoint::<S>(&mut seq, v)?;
                seq.end()
            }
            DateValue::Compound(ref start, ref stop) => {
                let mut seq = serializer.serialize_seq(Some(8))?;
                endpoint::<S>(&mut seq, start)?;
                endpoint::<S>(&mut seq, stop)?;
                seq.end()
            }
        }
    }
}

/// One element of a serialized dateval: old writers stored the slash
/// flags as 0/1, newer ones as booleans.
enum RawField {
    Int(i64),
    Bool(bool),
}

impl RawField {
    fn as_int<E: de::Error>(&self) -> Result<i32, E> {
        match *self {
            RawField::Int(n) => i32::try_from(n).map_err(|_| {
                E::custom("dateval field out of range")
            }),
            RawField::Bool(_) => {
                Err(E::custom("expected an integer dateval field"))
            }
        }
    }

    fn as_flag(&self) -> bool {
        match *self {
            RawField::Int(n) => n != 0,
            RawField::Bool(b) => b,
        }
    }
}

impl<'de> Deserialize<'de> for RawField {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<RawField, D::Error> {
        struct FieldVisitor;

        impl Visitor<'_> for FieldVisitor {
            type Value = RawField;

            fn expecting(
                &self,
                f: &mut core::fmt::Formatter,
            ) -> core::fmt::Result {
                f.write_str("an integer or a boolean")
            }

            fn visit_i64<E: de::Error>(
                self,
                v: i64,
            ) -> Result<RawField, E> {
                Ok(RawField::Int(v))
            }

            fn visit_u64<E: de::Error>(
                self,
                v: u64,
            ) -> Result<RawField, E> {
                i64::try_from(v)
                    .map(RawField::Int)
                    .map_err(|_| E::custom("dateval field out of range"))
            }

            fn visit_bool<E: de::Error>(
                self,
                v: bool,
            ) -> Result<RawField, E> {
                Ok(RawField::Bool(v))
            }
        }

        deserializer.deserialize_any(FieldVisitor)
    }
}

impl<'de> Deserialize<'de> for DateValue {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateValue, D::Error> {
        struct DateValueVisitor;

        impl<'de> Visitor<'de> for DateValueVisitor {
            type Value = DateValue;

            fn expecting(
                &self,
                f: &mut core::fmt::Formatter,
            ) -> core::fmt::Result {
                f.write_str("a sequence of 4 or 8 dateval fields")
            }

            fn visit_seq<A: SeqAccess<'de>>(
                self,
                mut seq: A,
            ) -> Result<DateValue, A::Error> {
                fn endpoint<'de, A: SeqAccess<'de>>(
                    seq: &mut A,
                ) -> Result<Option<DateVal>, A::Error> {
                    let Some(day) = seq.next_element::<RawField>()?
                    else {
                        return Ok(None);
                    };
                    let field = |f: Option<RawField>| -> Result<RawField, A::Error> {
                        f.ok_or_else(|| {
                            de::Error::custom(
                                "dateval length must be 4 or 8",
                            )
                        })
                    };
                    let month = field(seq.next_element()?)?;
                    let year = field(seq.next_element()?)?;
                    let slash = field(seq.next_element()?)?;
                    Ok(Some(DateVal {
                        day: day.as_int()?,
                        month: month.as_int()?,
                        year: year.as_int()?,
                        slash: slash.as_flag(),
                    }))
                }

                let Some(start) = endpoint(&mut seq)? else {
                    return Err(de::Error::custom(
                        "dateval must not be empty",
                    ));
                };
                match endpoint(&mut seq)? {
                    None => Ok(DateValue::Simple(start)),
                    Some(stop) => Ok(DateValue::Compound(start, stop)),
                }
            }
        }

        deserializer.deserialize_seq(DateValueVisitor)
    }
}

impl Serialize for NewYear {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match *self {
            NewYear::Jan1 => serializer.serialize_i32(0),
            NewYear::Mar1 => serializer.serialize_i32(1),
            NewYear::Mar25 => serializer.serialize_i32(2),
            NewYear::Sep1 => serializer.serialize_i32(3),
            NewYear::Custom(month, day) => {
                let mut seq = serializer.serialize_seq(Some(2))?;
                seq.serialize_element(&month)?;
                seq.serialize_element(&day)?;
                seq.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for NewYear {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NewYear, D::Error> {
        struct NewYearVisitor;

        impl<'de> Visitor<'de> for NewYearVisitor {
            type Value = NewYear;

            fn expecting(
                &self,
                f: &mut core::fmt::Formatter,
            ) -> core::fmt::Result {
                f.write_str(
                    "a new-year code or a [month, day] pair",
                )
            }

            fn visit_i64<E: de::Error>(
                self,
                v: i64,
            ) -> Result<NewYear, E> {
                match v {
                    0 => Ok(NewYear::Jan1),
                    1 => Ok(NewYear::Mar1),
                    2 => Ok(NewYear::Mar25),
                    3 => Ok(NewYear::Sep1),
                    _ => Err(E::custom("unknown new-year code")),
                }
            }

            fn visit_u64<E: de::Error>(
                self,
                v: u64,
            ) -> Result<NewYear, E> {
                i64::try_from(v)
                    .map_err(|_| E::custom("unknown new-year code"))
                    .and_then(|v| self.visit_i64(v))
            }

            fn visit_seq<A: SeqAccess<'de>>(
                self,
                mut seq: A,
            ) -> Result<NewYear, A::Error> {
                let month = seq.next_element::<i32>()?.ok_or_else(|| {
                    de::Error::custom("new-year pair needs a month")
                })?;
                let day = seq.next_element::<i32>()?.ok_or_else(|| {
                    de::Error::custom("new-year pair needs a day")
                })?;
                Ok(NewYear::Custom(month, day))
            }
        }

        deserializer.deserialize_any(NewYearVisitor)
    }
}

impl Serialize for RawDate {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(7))?;
        seq.serialize_element(&self.calendar)?;
        seq.serialize_element(&self.modifier)?;
        seq.serialize_element(&self.quality)?;
        seq.serialize_element(&self.dateval)?;
        seq.serialize_element(&self.text)?;
        seq.serialize_element(&self.sortval)?;
        seq.serialize_element(&self.newyear)?;
        seq.end()
    }
}

impl<'de> Deserialize<'de> for RawDate {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<RawDate, D::Error> {
        struct RawDateVisitor;

        impl<'de> Visitor<'de> for RawDateVisitor {
            type Value = RawDate;

            fn expecting(
                &self,
                f: &mut core::fmt::Formatter,
            ) -> core::fmt::Result {
                f.write_str("a date tuple of 6 or 7 elements")
            }

            fn visit_seq<A: SeqAccess<'de>>(
                self,
                mut seq: A,
            ) -> Result<RawDate, A::Error> {
                fn need<'de, T: Deserialize<'de>, A: SeqAccess<'de>>(
                    seq: &mut A,
                    what: &'static str,
                ) -> Result<T, A::Error> {
                    seq.next_element::<T>()?.ok_or_else(|| {
                        de::Error::custom(what)
                    })
                }

                let calendar = need(&mut seq, "missing calendar")?;
                let modifier = need(&mut seq, "missing modifier")?;
                let quality = need(&mut seq, "missing quality")?;
                let dateval = need(&mut seq, "missing dateval")?;
                let text = need(&mut seq, "missing text")?;
                let sortval = need(&mut seq, "missing sortval")?;
                // The seventh element postdates the original format;
                // older data omits it.
                let newyear = seq
                    .next_element::<NewYear>()?
                    .unwrap_or(NewYear::Jan1);
                Ok(RawDate {
                    calendar,
                    modifier,
                    quality,
                    dateval,
                    text,
                    sortval,
                    newyear,
                })
            }
        }

        deserializer.deserialize_seq(RawDateVisitor)
    }
}

impl Serialize for Date {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        self.serialize(false).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Date {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Date, D::Error> {
        let raw = RawDate::deserialize(deserializer)?;
        Date::unserialize(raw).map_err(de::Error::custom)
    }
}
