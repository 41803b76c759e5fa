//! The `acct_gather.conf` dialect: accounting-plugin settings for energy,
//! interconnect, filesystem, and profile collection.

use std::sync::OnceLock;

use super::dialect_file;
use crate::schema::{FieldDef, MapFormat, Schema};

fn schema() -> &'static Schema {
    static SCHEMA: OnceLock<Schema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        Schema::new(
            "acct_gather.conf",
            vec![
                FieldDef::int("energy_ipmi_frequency", "EnergyIPMIFrequency"),
                FieldDef::yes_no("energy_ipmi_calc_adjustment", "EnergyIPMICalcAdjustment"),
                FieldDef::map(
                    "energy_ipmi_power_sensors",
                    "EnergyIPMIPowerSensors",
                    MapFormat::SEMICOLON,
                ),
                FieldDef::str("energy_ipmi_username", "EnergyIPMIUsername"),
                FieldDef::str("energy_ipmi_password", "EnergyIPMIPassword"),
                FieldDef::int("energy_ipmi_timeout", "EnergyIPMITimeout"),
                FieldDef::str("profile_hdf5_dir", "ProfileHDF5Dir"),
                FieldDef::list("profile_hdf5_default", "ProfileHDF5Default"),
                FieldDef::str("profile_influxdb_database", "ProfileInfluxDBDatabase"),
                FieldDef::list("profile_influxdb_default", "ProfileInfluxDBDefault"),
                FieldDef::str("profile_influxdb_host", "ProfileInfluxDBHost"),
                FieldDef::str("profile_influxdb_pass", "ProfileInfluxDBPass"),
                FieldDef::str("profile_influxdb_rt_policy", "ProfileInfluxDBRTPolicy"),
                FieldDef::str("profile_influxdb_user", "ProfileInfluxDBUser"),
                FieldDef::int("profile_influxdb_timeout", "ProfileInfluxDBTimeout"),
                FieldDef::int("infiniband_ofed_port", "InfinibandOFEDPort"),
                FieldDef::list("sysfs_interfaces", "SysfsInterfaces"),
            ],
        )
    })
}

dialect_file!(
    /// Typed view of an `acct_gather.conf` file.
    AcctGatherConfig,
    "acct_gather.conf"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let text = "EnergyIPMIFrequency=10\n\
                    EnergyIPMICalcAdjustment=yes\n\
                    ProfileHDF5Dir=/var/log/profile\n\
                    ProfileHDF5Default=energy,task\n\
                    SysfsInterfaces=eth0,eth1\n";
        let config = loads(text).unwrap();
        assert_eq!(
            config.get_int("energy_ipmi_frequency").unwrap(),
            Some(10)
        );
        assert_eq!(dumps(&config), text);
    }

    #[test]
    fn test_semicolon_map_round_trips() {
        let text = "EnergyIPMIPowerSensors=Node=16,19;Socket1=19,26;KNC=16,19\n";
        let config = loads(text).unwrap();
        let sensors = config.get("energy_ipmi_power_sensors").unwrap().unwrap();
        assert_eq!(sensors.as_map().unwrap().len(), 3);
        assert_eq!(dumps(&config), text);
    }
}
