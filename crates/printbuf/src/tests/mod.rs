mod property_growth;
