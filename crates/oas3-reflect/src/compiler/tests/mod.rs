mod structs;
